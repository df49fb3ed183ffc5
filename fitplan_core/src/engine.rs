//! Plan generation engine.
//!
//! Profile → split → session dates → twelve composed sessions → [`Plan`].
//! Generation is synchronous and always runs to completion once the profile
//! has been validated.

use crate::catalog::Catalog;
use crate::composer::SessionComposer;
use crate::{schedule, split, Plan, Profile, Result, Session};
use chrono::{NaiveDate, Utc};
use rand::Rng;
use uuid::Uuid;

/// Number of sessions in every plan
pub const SESSION_COUNT: usize = 12;

/// Generate a plan starting today, using the thread-local RNG
pub fn generate_plan(catalog: &Catalog, profile: &Profile) -> Result<Plan> {
    generate_plan_from(catalog, profile, schedule::today(), &mut rand::rng())
}

/// Generate a plan with an explicit start date and randomness source
pub fn generate_plan_from<R: Rng + ?Sized>(
    catalog: &Catalog,
    profile: &Profile,
    start: NaiveDate,
    rng: &mut R,
) -> Result<Plan> {
    profile.validate()?;

    let workout_split = split::choose_split(&profile.goal, profile.experience);
    tracing::info!(
        "Generating {:?} plan for goal '{}' ({})",
        workout_split,
        profile.goal,
        profile.experience
    );

    let dates = schedule::generate_dates(start, profile.days_per_week, SESSION_COUNT)?;
    let composer = SessionComposer::new(catalog, profile.experience, &profile.equipment);

    let sessions = dates
        .into_iter()
        .zip(1u32..)
        .map(|(date, session_number)| {
            let focus = split::focus_for(workout_split, session_number);
            tracing::debug!(
                "Session {} on {}: {} / {}",
                session_number,
                date,
                focus.primary,
                focus.secondary
            );
            Session {
                session_number,
                date,
                focus,
                sections: composer.compose(session_number, focus, &mut *rng),
            }
        })
        .collect();

    Ok(Plan {
        id: Uuid::new_v4(),
        user: profile.clone(),
        workout_split,
        sessions,
        created_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_default_catalog;
    use crate::{logging, Error, Experience, Goal, MuscleLabel, SplitType};
    use chrono::{Datelike, Weekday};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn strength_profile() -> Profile {
        Profile {
            name: "Jordan".into(),
            age: 29,
            gender: "nonbinary".into(),
            goal: Goal::Strength,
            experience: Experience::Advanced,
            equipment: vec!["barbell".into(), "dumbbells".into(), "bodyweight".into()],
            days_per_week: 4,
        }
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_plan_has_twelve_numbered_sessions() {
        logging::init_test();
        let catalog = build_default_catalog();
        let mut rng = StdRng::seed_from_u64(42);

        let plan = generate_plan_from(&catalog, &strength_profile(), start(), &mut rng).unwrap();

        assert_eq!(plan.sessions.len(), SESSION_COUNT);
        for (i, session) in plan.sessions.iter().enumerate() {
            assert_eq!(session.session_number as usize, i + 1);
            assert!(!matches!(session.date.weekday(), Weekday::Sat | Weekday::Sun));
        }
        assert!(plan.sessions.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_strength_advanced_end_to_end() {
        let catalog = build_default_catalog();
        let profile = strength_profile();

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = generate_plan_from(&catalog, &profile, start(), &mut rng).unwrap();
            assert_eq!(plan.workout_split, SplitType::PushPullLegs);

            // Session 4 → slot 5, session 6 wraps to slot 1
            let s4 = &plan.sessions[3].focus;
            assert_eq!((s4.primary, s4.secondary), (MuscleLabel::Back, MuscleLabel::Arms));
            let s6 = &plan.sessions[5].focus;
            assert_eq!(
                (s6.primary, s6.secondary),
                (MuscleLabel::Chest, MuscleLabel::Shoulders)
            );

            // Sessions 2 and 5 are leg days
            for index in [1, 4] {
                let session = &plan.sessions[index];
                assert_eq!(session.focus.primary, MuscleLabel::Legs);
                let allowed: Vec<_> = MuscleLabel::Legs
                    .expand()
                    .iter()
                    .chain(MuscleLabel::Core.expand())
                    .collect();
                assert!(!session.sections.main.is_empty());
                assert!(session
                    .sections
                    .main
                    .iter()
                    .all(|ex| allowed.contains(&&ex.muscle_group)));
            }
        }
    }

    #[test]
    fn test_optional_blocks_follow_session_number() {
        let catalog = build_default_catalog();
        let mut rng = StdRng::seed_from_u64(9);
        let plan = generate_plan_from(&catalog, &strength_profile(), start(), &mut rng).unwrap();

        for session in &plan.sessions {
            let n = session.session_number;
            assert_eq!(session.sections.circuit.is_some(), n % 4 == 0, "session {}", n);
            // Every push/pull/legs focus pair has candidates on both sides here
            assert_eq!(session.sections.superset.is_some(), n % 3 == 0, "session {}", n);
        }
    }

    #[test]
    fn test_bro_split_superset_dropped_for_unmapped_secondary() {
        let catalog = build_default_catalog();
        let profile = Profile {
            goal: Goal::MuscleGain,
            ..strength_profile()
        };
        let mut rng = StdRng::seed_from_u64(4);
        let plan = generate_plan_from(&catalog, &profile, start(), &mut rng).unwrap();

        assert_eq!(plan.workout_split, SplitType::BroSplit);
        // Session 3 → slot 4: shoulders / traps, but "traps" expands to nothing
        let session = &plan.sessions[2];
        assert_eq!(session.focus.secondary, MuscleLabel::Traps);
        assert!(session.sections.superset.is_none());
    }

    #[test]
    fn test_beginner_plan_is_full_body() {
        let catalog = build_default_catalog();
        let profile = Profile {
            experience: Experience::Beginner,
            equipment: vec!["bodyweight".into()],
            days_per_week: 2,
            ..strength_profile()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let plan = generate_plan_from(&catalog, &profile, start(), &mut rng).unwrap();

        assert_eq!(plan.workout_split, SplitType::FullBody);
        for session in &plan.sessions {
            assert_eq!(session.focus.primary, MuscleLabel::FullBody);
            if let Some(circuit) = &session.sections.circuit {
                assert_eq!(circuit.rounds, 2);
            }
        }
    }

    #[test]
    fn test_invalid_profile_fails_fast() {
        let catalog = build_default_catalog();
        let profile = Profile {
            days_per_week: 0,
            ..strength_profile()
        };
        let mut rng = StdRng::seed_from_u64(0);

        let result = generate_plan_from(&catalog, &profile, start(), &mut rng);
        assert!(matches!(result, Err(Error::InvalidProfile(_))));
    }

    #[test]
    fn test_plan_json_shape() {
        let catalog = build_default_catalog();
        let mut rng = StdRng::seed_from_u64(8);
        let plan = generate_plan_from(&catalog, &strength_profile(), start(), &mut rng).unwrap();

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["workoutSplit"], "push_pull_legs");
        assert!(json["createdAt"].is_string());
        assert_eq!(json["user"]["goal"], "strength");

        let first = &json["sessions"][0];
        assert_eq!(first["session"], 1);
        assert_eq!(first["date"], "Friday, October 16");
        assert_eq!(first["focus"]["primary"], "back");
        assert!(first["sections"].get("circuit").is_none());

        let fourth = &json["sessions"][3]["sections"]["circuit"];
        assert_eq!(fourth["rest_between_rounds"], "90 seconds");
    }

    #[test]
    fn test_generate_plan_uses_today() {
        let catalog = build_default_catalog();
        let plan = generate_plan(&catalog, &strength_profile()).unwrap();
        assert!(plan.sessions[0].date >= schedule::today());
    }
}
