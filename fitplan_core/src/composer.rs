//! Session composition.
//!
//! Builds the warm-up, main, cool-down and optional circuit/superset blocks
//! for one session from the catalog. Thin catalog coverage never fails a
//! session: a pick with no candidates is simply left out.

use crate::catalog::{Catalog, ExerciseQuery};
use crate::{
    progression, CatalogExercise, CircuitBlock, CircuitExercise, Experience, Focus, MuscleGroup,
    MuscleLabel, Phase, Sections, SessionExercise, SupersetBlock, TimeSpan,
};
use rand::Rng;

/// A circuit is added on every session number divisible by this
pub const CIRCUIT_INTERVAL: u32 = 4;

/// A superset is attempted on every session number divisible by this
pub const SUPERSET_INTERVAL: u32 = 3;

const CIRCUIT_MAX_EXERCISES: usize = 4;
const CIRCUIT_DEFAULT_REPS: u32 = 10;
const CIRCUIT_DEFAULT_TIME: TimeSpan = TimeSpan::seconds(30);
const CIRCUIT_REST_BETWEEN_EXERCISES: TimeSpan = TimeSpan::seconds(30);
const CIRCUIT_REST_BETWEEN_ROUNDS: TimeSpan = TimeSpan::seconds(90);

const SUPERSET_DEFAULT_SETS: u32 = 3;
const SUPERSET_DEFAULT_REPS: u32 = 10;
const SUPERSET_DEFAULT_REST: TimeSpan = TimeSpan::seconds(60);

const GENERAL_WARMUP_GROUPS: [MuscleGroup; 2] = [MuscleGroup::FullBody, MuscleGroup::Cardio];

pub fn has_circuit(session_number: u32) -> bool {
    session_number % CIRCUIT_INTERVAL == 0
}

pub fn has_superset_slot(session_number: u32) -> bool {
    session_number % SUPERSET_INTERVAL == 0
}

/// Rounds for circuits and supersets
pub fn block_rounds(experience: Experience) -> u32 {
    match experience {
        Experience::Beginner => 2,
        Experience::Intermediate | Experience::Advanced => 3,
    }
}

/// `max(lo, min(hi, n))`
fn clamp_count(n: usize, lo: usize, hi: usize) -> usize {
    lo.max(hi.min(n))
}

fn pick_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Option<usize> {
    (len > 0).then(|| rng.random_range(0..len))
}

fn pick<'c, R: Rng + ?Sized>(
    candidates: &[&'c CatalogExercise],
    rng: &mut R,
) -> Option<&'c CatalogExercise> {
    pick_index(candidates.len(), rng).map(|i| candidates[i])
}

/// Composes the sections of individual sessions for one profile
pub struct SessionComposer<'a> {
    catalog: &'a Catalog,
    experience: Experience,
    equipment: &'a [String],
}

impl<'a> SessionComposer<'a> {
    pub fn new(catalog: &'a Catalog, experience: Experience, equipment: &'a [String]) -> Self {
        Self {
            catalog,
            experience,
            equipment,
        }
    }

    fn candidates(&self, phase: Phase, groups: &[MuscleGroup]) -> Vec<&'a CatalogExercise> {
        self.catalog.query(
            &ExerciseQuery::phase(phase)
                .with_equipment(self.equipment)
                .with_muscle_groups(groups),
        )
    }

    /// Build every section for a session
    pub fn compose<R: Rng + ?Sized>(
        &self,
        session_number: u32,
        focus: Focus,
        rng: &mut R,
    ) -> Sections {
        let mut sections = Sections {
            warmup: self.warmup(focus.primary, rng),
            main: self.main(focus, session_number, rng),
            cooldown: self.cooldown(),
            circuit: None,
            superset: None,
        };

        if has_circuit(session_number) {
            sections.circuit = Some(self.circuit(focus));
        }
        if has_superset_slot(session_number) {
            sections.superset = self.superset(focus, rng).map(|block| vec![block]);
        }

        sections
    }

    /// One general warm-up plus one or two focus warm-ups
    pub fn warmup<R: Rng + ?Sized>(
        &self,
        primary: MuscleLabel,
        rng: &mut R,
    ) -> Vec<SessionExercise> {
        let mut selected: Vec<&CatalogExercise> = Vec::with_capacity(3);

        let general = self.candidates(Phase::Warmup, &GENERAL_WARMUP_GROUPS);
        match pick(&general, rng) {
            Some(exercise) => selected.push(exercise),
            None => tracing::debug!("No general warm-up available for equipment"),
        }

        let focused = self.candidates(Phase::Warmup, primary.expand());
        match pick(&focused, rng) {
            Some(first) => {
                selected.push(first);

                if focused.len() > 1 && rng.random_bool(0.5) {
                    let remaining: Vec<&CatalogExercise> = focused
                        .iter()
                        .copied()
                        .filter(|c| !selected.iter().any(|s| std::ptr::eq(*s, *c)))
                        .collect();
                    if let Some(second) = pick(&remaining, rng) {
                        selected.push(second);
                    }
                }
            }
            None => tracing::debug!("No warm-up matches focus '{}'", primary),
        }

        selected.into_iter().map(SessionExercise::from).collect()
    }

    /// 3-4 primary and 2-3 secondary lifts, progression applied
    pub fn main<R: Rng + ?Sized>(
        &self,
        focus: Focus,
        session_number: u32,
        rng: &mut R,
    ) -> Vec<SessionExercise> {
        let mut selected = Vec::new();

        for (label, lo, hi) in [(focus.primary, 3, 4), (focus.secondary, 2, 3)] {
            let pool = self.candidates(Phase::Main, label.expand());
            if pool.is_empty() {
                tracing::debug!("No main exercises match '{}'", label);
                continue;
            }

            for _ in 0..clamp_count(pool.len(), lo, hi) {
                if let Some(exercise) = pick(&pool, rng) {
                    selected.push(progression::apply(
                        &SessionExercise::from(exercise),
                        session_number,
                        self.experience,
                    ));
                }
            }
        }

        selected
    }

    /// Every cool-down usable with the owned equipment
    pub fn cooldown(&self) -> Vec<SessionExercise> {
        self.catalog
            .query(&ExerciseQuery::phase(Phase::Cooldown).with_equipment(self.equipment))
            .into_iter()
            .map(SessionExercise::from)
            .collect()
    }

    /// First main exercises (catalog order) matching either focus
    pub fn circuit(&self, focus: Focus) -> CircuitBlock {
        let groups: Vec<MuscleGroup> = focus
            .primary
            .expand()
            .iter()
            .chain(focus.secondary.expand())
            .copied()
            .collect();

        let exercises = self
            .candidates(Phase::Main, &groups)
            .into_iter()
            .take(CIRCUIT_MAX_EXERCISES)
            .map(|ex| CircuitExercise {
                name: ex.name.clone(),
                reps: ex.reps.unwrap_or(CIRCUIT_DEFAULT_REPS),
                time: ex.duration.unwrap_or(CIRCUIT_DEFAULT_TIME),
            })
            .collect();

        CircuitBlock {
            rounds: block_rounds(self.experience),
            rest_between_exercises: CIRCUIT_REST_BETWEEN_EXERCISES,
            rest_between_rounds: CIRCUIT_REST_BETWEEN_ROUNDS,
            exercises,
        }
    }

    /// One primary and one secondary lift paired, if both exist
    pub fn superset<R: Rng + ?Sized>(&self, focus: Focus, rng: &mut R) -> Option<SupersetBlock> {
        let primary_pool = self.candidates(Phase::Main, focus.primary.expand());
        let secondary_pool = self.candidates(Phase::Main, focus.secondary.expand());

        let (Some(first), Some(second)) = (pick(&primary_pool, rng), pick(&secondary_pool, rng))
        else {
            tracing::debug!(
                "Skipping superset: {} primary / {} secondary candidates",
                primary_pool.len(),
                secondary_pool.len()
            );
            return None;
        };

        let with_defaults = |entry: &CatalogExercise| {
            let mut exercise = SessionExercise::from(entry);
            exercise.sets = Some(entry.sets.unwrap_or(SUPERSET_DEFAULT_SETS));
            exercise.reps = Some(entry.reps.unwrap_or(SUPERSET_DEFAULT_REPS));
            exercise.rest = Some(entry.rest.unwrap_or(SUPERSET_DEFAULT_REST));
            exercise
        };

        Some(SupersetBlock {
            name: format!("{} + {} Superset", focus.primary, focus.secondary),
            rounds: block_rounds(self.experience),
            exercises: vec![with_defaults(first), with_defaults(second)],
        })
    }
}
