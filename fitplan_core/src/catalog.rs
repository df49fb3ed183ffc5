//! Default exercise catalog and muscle-group taxonomy.
//!
//! The catalog is static reference data: entries are declared once, in a
//! fixed order, and only ever read. Queries return entries in declaration
//! order; any randomness is applied by the caller.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Cached default catalog - built once and reused across all plans
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

// ============================================================================
// Taxonomy
// ============================================================================

impl MuscleLabel {
    /// Fine catalog tags covered by this focus label
    ///
    /// Labels without an entry (triceps, biceps, traps, forearms) expand to
    /// nothing, so filtering on them matches no exercises.
    pub fn expand(&self) -> &'static [MuscleGroup] {
        use MuscleGroup as G;
        match self {
            MuscleLabel::Chest => &[G::Chest, G::Shoulders, G::Triceps],
            MuscleLabel::Back => &[G::Back, G::Biceps, G::RearDeltoids],
            MuscleLabel::Legs => &[G::Quadriceps, G::Hamstrings, G::Calves, G::Glutes],
            MuscleLabel::Shoulders => &[G::Shoulders, G::Traps, G::Triceps],
            MuscleLabel::Arms => &[G::Biceps, G::Triceps, G::Forearms],
            MuscleLabel::Core => &[G::Abs, G::Obliques, G::LowerBack],
            MuscleLabel::FullBody => &[G::FullBody],
            MuscleLabel::Cardio => &[G::Cardio],
            MuscleLabel::Triceps
            | MuscleLabel::Biceps
            | MuscleLabel::Traps
            | MuscleLabel::Forearms => &[],
        }
    }
}

// ============================================================================
// Query
// ============================================================================

/// Filter over the catalog; `None` means "no constraint"
#[derive(Clone, Copy, Debug, Default)]
pub struct ExerciseQuery<'a> {
    pub phase: Option<Phase>,
    pub equipment: Option<&'a [String]>,
    pub muscle_groups: Option<&'a [MuscleGroup]>,
}

impl<'a> ExerciseQuery<'a> {
    pub fn phase(phase: Phase) -> Self {
        Self {
            phase: Some(phase),
            ..Self::default()
        }
    }

    pub fn with_equipment(mut self, owned: &'a [String]) -> Self {
        self.equipment = Some(owned);
        self
    }

    pub fn with_muscle_groups(mut self, groups: &'a [MuscleGroup]) -> Self {
        self.muscle_groups = Some(groups);
        self
    }

    fn matches(&self, exercise: &CatalogExercise) -> bool {
        if self.phase.is_some_and(|p| p != exercise.phase) {
            return false;
        }
        if let Some(owned) = self.equipment {
            if !exercise.usable_with(owned) {
                return false;
            }
        }
        if let Some(groups) = self.muscle_groups {
            if !groups.contains(&exercise.muscle_group) {
                return false;
            }
        }
        true
    }
}

/// The complete catalog of exercises
#[derive(Clone, Debug)]
pub struct Catalog {
    pub exercises: Vec<CatalogExercise>,
}

impl Catalog {
    /// All entries matching every provided filter, in declaration order
    pub fn query(&self, query: &ExerciseQuery<'_>) -> Vec<&CatalogExercise> {
        self.exercises.iter().filter(|ex| query.matches(ex)).collect()
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for exercise in &self.exercises {
            if exercise.name.is_empty() {
                errors.push("Exercise has empty name".to_string());
            }
            if !seen.insert(exercise.name.as_str()) {
                errors.push(format!("Duplicate exercise name '{}'", exercise.name));
            }
            if exercise.equipment.is_empty() {
                errors.push(format!("Exercise '{}' lists no equipment", exercise.name));
            }
            if exercise.duration.is_none() && exercise.reps.is_none() {
                errors.push(format!(
                    "Exercise '{}' has neither duration nor reps",
                    exercise.name
                ));
            }
            if exercise.phase == Phase::Main && exercise.sets.is_none() {
                errors.push(format!("Main exercise '{}' has no sets", exercise.name));
            }
        }

        for phase in [Phase::Warmup, Phase::Main, Phase::Cooldown] {
            if !self.exercises.iter().any(|ex| ex.phase == phase) {
                errors.push(format!("Catalog has no {:?} exercises", phase));
            }
        }

        errors
    }
}

// ============================================================================
// Default Catalog
// ============================================================================

fn timed(
    name: &str,
    phase: Phase,
    muscle_group: MuscleGroup,
    equipment: &[&str],
    duration: TimeSpan,
) -> CatalogExercise {
    CatalogExercise {
        name: name.into(),
        phase,
        muscle_group,
        equipment: equipment.iter().map(|e| e.to_string()).collect(),
        sets: None,
        reps: None,
        rest: None,
        duration: Some(duration),
    }
}

fn lift(
    name: &str,
    muscle_group: MuscleGroup,
    equipment: &[&str],
    sets: u32,
    reps: u32,
    rest_seconds: u32,
) -> CatalogExercise {
    CatalogExercise {
        name: name.into(),
        phase: Phase::Main,
        muscle_group,
        equipment: equipment.iter().map(|e| e.to_string()).collect(),
        sets: Some(sets),
        reps: Some(reps),
        rest: Some(TimeSpan::seconds(rest_seconds)),
        duration: None,
    }
}

/// Builds the default catalog
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference. This function is retained for testing and custom catalogs.
pub fn build_default_catalog() -> Catalog {
    use MuscleGroup as G;
    use Phase::{Cooldown, Warmup};

    let mut exercises = vec![
        // ====================================================================
        // Warm-ups
        // ====================================================================
        timed("Light Jogging", Warmup, G::Cardio, &["bodyweight"], TimeSpan::minutes(5)),
        timed("Jumping Jacks", Warmup, G::Cardio, &["bodyweight"], TimeSpan::minutes(2)),
        timed("Jump Rope", Warmup, G::Cardio, &["jump_rope"], TimeSpan::minutes(3)),
        timed("Inchworms", Warmup, G::FullBody, &["bodyweight"], TimeSpan::minutes(2)),
        timed("Arm Circles", Warmup, G::Shoulders, &["bodyweight"], TimeSpan::minutes(1)),
        timed("Band Pull-Aparts", Warmup, G::RearDeltoids, &["resistance_bands"], TimeSpan::minutes(1)),
        timed("Scapular Push-ups", Warmup, G::Chest, &["bodyweight"], TimeSpan::minutes(1)),
        timed("Leg Swings", Warmup, G::Hamstrings, &["bodyweight"], TimeSpan::minutes(1)),
        timed("Hip Circles", Warmup, G::Glutes, &["bodyweight"], TimeSpan::minutes(1)),
        timed("Cat-Cow", Warmup, G::LowerBack, &["bodyweight"], TimeSpan::minutes(1)),
        CatalogExercise {
            name: "Bodyweight Squats".into(),
            phase: Warmup,
            muscle_group: G::Quadriceps,
            equipment: vec!["bodyweight".into()],
            sets: Some(2),
            reps: Some(10),
            rest: None,
            duration: None,
        },
        // ====================================================================
        // Main lifts
        // ====================================================================
        lift("Push-ups", G::Chest, &["bodyweight"], 3, 12, 60),
        lift("Pull-ups", G::Back, &["bodyweight", "pullup_bar"], 3, 8, 90),
        lift("Dumbbell Bench Press", G::Chest, &["dumbbells"], 4, 10, 90),
        lift("Barbell Bench Press", G::Chest, &["barbell"], 4, 6, 120),
        lift("Barbell Squats", G::Quadriceps, &["barbell"], 4, 8, 120),
        lift("Dumbbell Shoulder Press", G::Shoulders, &["dumbbells"], 3, 12, 60),
        lift("Bent Over Rows", G::Back, &["dumbbells", "barbell"], 3, 12, 90),
        lift("Tricep Dips", G::Triceps, &["bodyweight"], 3, 10, 60),
        lift("Dumbbell Curls", G::Biceps, &["dumbbells"], 3, 12, 60),
        lift("Reverse Flyes", G::RearDeltoids, &["dumbbells", "resistance_bands"], 3, 15, 45),
        lift("Dumbbell Shrugs", G::Traps, &["dumbbells"], 3, 15, 45),
        lift("Farmer's Carry Holds", G::Forearms, &["dumbbells", "kettlebell"], 3, 8, 60),
        lift("Walking Lunges", G::Quadriceps, &["bodyweight", "dumbbells"], 3, 12, 60),
        lift("Romanian Deadlifts", G::Hamstrings, &["barbell", "dumbbells"], 3, 10, 90),
        lift("Glute Bridges", G::Glutes, &["bodyweight"], 3, 15, 45),
        lift("Standing Calf Raises", G::Calves, &["bodyweight", "dumbbells"], 3, 20, 45),
        lift("Bicycle Crunches", G::Abs, &["bodyweight"], 3, 20, 45),
        lift("Russian Twists", G::Obliques, &["bodyweight", "kettlebell"], 3, 16, 45),
        lift("Superman Holds", G::LowerBack, &["bodyweight"], 3, 12, 45),
        CatalogExercise {
            name: "Plank".into(),
            phase: Phase::Main,
            muscle_group: G::Abs,
            equipment: vec!["bodyweight".into()],
            sets: Some(3),
            reps: None,
            rest: Some(TimeSpan::seconds(45)),
            duration: Some(TimeSpan::seconds(45)),
        },
        lift("Burpees", G::FullBody, &["bodyweight"], 3, 10, 60),
        lift("Kettlebell Swings", G::FullBody, &["kettlebell"], 4, 15, 60),
        lift("Dumbbell Thrusters", G::FullBody, &["dumbbells"], 3, 12, 75),
        lift("Mountain Climbers", G::Cardio, &["bodyweight"], 3, 30, 45),
        lift("High Knees", G::Cardio, &["bodyweight"], 3, 40, 30),
    ];

    // ========================================================================
    // Cool-downs
    // ========================================================================
    exercises.extend([
        timed("Light Stretching", Cooldown, G::FullBody, &["bodyweight"], TimeSpan::minutes(5)),
        timed("Deep Breathing", Cooldown, G::FullBody, &["bodyweight"], TimeSpan::minutes(2)),
        timed("Child's Pose", Cooldown, G::LowerBack, &["bodyweight"], TimeSpan::minutes(1)),
        timed("Foam Rolling", Cooldown, G::FullBody, &["foam_roller"], TimeSpan::minutes(5)),
    ]);

    Catalog { exercises }
}
