//! Progressive overload across the sessions of a plan.
//!
//! Every three sessions count as one training week. Each completed week adds
//! volume (sets, reps) and trims rest according to the user's experience:
//!
//! | experience   | sets/week | reps/week | rest/week |
//! |--------------|-----------|-----------|-----------|
//! | beginner     | +0.5      | +2        | −5 s      |
//! | intermediate | +1        | +1        | −10 s     |
//! | advanced     | +1        | +2        | −15 s     |
//!
//! Sets and reps never drop below 1, rest never below 30 seconds.

use crate::{Experience, SessionExercise, TimeSpan};

/// Sessions per training week
pub const SESSIONS_PER_WEEK: u32 = 3;

/// Minimum rest after progression, in seconds
pub const MIN_REST_SECONDS: i64 = 30;

/// Per-week increments for one experience level
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Increment {
    pub sets: f64,
    pub reps: i64,
    pub rest_seconds: i64,
}

/// Increment table lookup
pub fn increment_for(experience: Experience) -> Increment {
    match experience {
        Experience::Beginner => Increment {
            sets: 0.5,
            reps: 2,
            rest_seconds: -5,
        },
        Experience::Intermediate => Increment {
            sets: 1.0,
            reps: 1,
            rest_seconds: -10,
        },
        Experience::Advanced => Increment {
            sets: 1.0,
            reps: 2,
            rest_seconds: -15,
        },
    }
}

/// Completed training weeks at a session number
pub fn weeks_completed(session_number: u32) -> u32 {
    session_number / SESSIONS_PER_WEEK
}

/// Apply progressive overload to an exercise
///
/// Returns a new value; fields the exercise does not carry are left as
/// they are.
pub fn apply(
    exercise: &SessionExercise,
    session_number: u32,
    experience: Experience,
) -> SessionExercise {
    let inc = increment_for(experience);
    let weeks = i64::from(weeks_completed(session_number));
    let mut adjusted = exercise.clone();

    if let Some(sets) = exercise.sets {
        let raw = (f64::from(sets) + weeks as f64 * inc.sets).floor();
        adjusted.sets = Some(raw.max(1.0) as u32);
    }
    if let Some(reps) = exercise.reps {
        let raw = i64::from(reps) + weeks * inc.reps;
        adjusted.reps = Some(raw.max(1) as u32);
    }
    if let Some(rest) = exercise.rest {
        let raw = i64::from(rest.as_seconds()) + weeks * inc.rest_seconds;
        adjusted.rest = Some(TimeSpan::seconds(raw.max(MIN_REST_SECONDS) as u32));
    }

    adjusted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MuscleGroup;

    const LEVELS: [Experience; 3] = [
        Experience::Beginner,
        Experience::Intermediate,
        Experience::Advanced,
    ];

    fn bench() -> SessionExercise {
        SessionExercise {
            name: "Dumbbell Bench Press".into(),
            muscle_group: MuscleGroup::Chest,
            equipment: vec!["dumbbells".into()],
            sets: Some(4),
            reps: Some(10),
            rest: Some(TimeSpan::seconds(90)),
            duration: None,
        }
    }

    #[test]
    fn test_first_week_is_unchanged() {
        for level in LEVELS {
            for session in 0..SESSIONS_PER_WEEK {
                assert_eq!(apply(&bench(), session, level), bench());
            }
        }
    }

    #[test]
    fn test_beginner_half_set_floors() {
        // Week 1: 4 + 0.5 = 4.5 → 4; week 2: 4 + 1.0 = 5
        let week1 = apply(&bench(), 3, Experience::Beginner);
        assert_eq!(week1.sets, Some(4));
        assert_eq!(week1.reps, Some(12));
        assert_eq!(week1.rest, Some(TimeSpan::seconds(85)));

        let week2 = apply(&bench(), 6, Experience::Beginner);
        assert_eq!(week2.sets, Some(5));
        assert_eq!(week2.reps, Some(14));
    }

    #[test]
    fn test_advanced_week_four() {
        let adjusted = apply(&bench(), 12, Experience::Advanced);
        assert_eq!(adjusted.sets, Some(8));
        assert_eq!(adjusted.reps, Some(18));
        assert_eq!(adjusted.rest, Some(TimeSpan::seconds(30)));
    }

    #[test]
    fn test_rest_floor() {
        let mut exercise = bench();
        exercise.rest = Some(TimeSpan::seconds(45));
        let adjusted = apply(&exercise, 30, Experience::Intermediate);
        assert_eq!(adjusted.rest, Some(TimeSpan::seconds(30)));
    }

    #[test]
    fn test_volume_monotonic_and_rest_non_increasing() {
        for level in LEVELS {
            let mut previous = bench();
            for session in 1..=24 {
                let adjusted = apply(&bench(), session, level);
                assert!(adjusted.sets >= previous.sets);
                assert!(adjusted.reps >= previous.reps);
                assert!(adjusted.sets.unwrap() >= 1);
                let rest = adjusted.rest.unwrap().as_seconds();
                assert!(rest <= previous.rest.unwrap().as_seconds());
                assert!(rest >= 30);
                previous = adjusted;
            }
        }
    }

    #[test]
    fn test_duration_only_exercise_untouched() {
        let stretch = SessionExercise {
            name: "Light Stretching".into(),
            muscle_group: MuscleGroup::FullBody,
            equipment: vec!["bodyweight".into()],
            sets: None,
            reps: None,
            rest: None,
            duration: Some(TimeSpan::minutes(5)),
        };
        assert_eq!(apply(&stretch, 12, Experience::Advanced), stretch);
    }

    #[test]
    fn test_apply_is_idempotent_and_leaves_input_alone() {
        let original = bench();
        let first = apply(&original, 9, Experience::Intermediate);
        let second = apply(&original, 9, Experience::Intermediate);
        assert_eq!(first, second);
        assert_eq!(original, bench());
    }
}
