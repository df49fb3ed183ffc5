//! Split selection and per-session focus rotation.
//!
//! A split is chosen once per plan. Each non-full-body split walks a fixed
//! six-slot table of (primary, secondary) pairs; the slot for session `n`
//! is `(n mod 6) + 1`, so sessions 6 and 12 land on slot 1.

use crate::{Experience, Focus, Goal, MuscleLabel, SplitType};

/// Length of every focus cycle
pub const CYCLE_LENGTH: u32 = 6;

use MuscleLabel::*;

const PUSH_PULL_LEGS: [(MuscleLabel, MuscleLabel); 6] = [
    (Chest, Shoulders),
    (Back, Arms),
    (Legs, Core),
    (Shoulders, Chest),
    (Back, Arms),
    (Legs, Core),
];

// Session n lands on slot n % 6 + 1, so odd sessions hit even slots and get
// the upper day.
const UPPER_LOWER: [(MuscleLabel, MuscleLabel); 6] = [
    (Legs, Core),
    (Chest, Back),
    (Legs, Core),
    (Chest, Back),
    (Legs, Core),
    (Chest, Back),
];

const BRO_SPLIT: [(MuscleLabel, MuscleLabel); 6] = [
    (Chest, Triceps),
    (Back, Biceps),
    (Legs, Core),
    (Shoulders, Traps),
    (Arms, Forearms),
    (Core, Cardio),
];

/// Choose the weekly split for a goal and experience level
///
/// Beginners always train full body. Goals without a dedicated split,
/// including unrecognized ones, also fall back to full body.
pub fn choose_split(goal: &Goal, experience: Experience) -> SplitType {
    if experience == Experience::Beginner {
        return SplitType::FullBody;
    }

    match goal {
        Goal::Strength => SplitType::PushPullLegs,
        Goal::MuscleGain if experience == Experience::Advanced => SplitType::BroSplit,
        Goal::MuscleGain => SplitType::UpperLower,
        Goal::FatLoss | Goal::Endurance | Goal::GeneralFitness | Goal::Other(_) => {
            SplitType::FullBody
        }
    }
}

/// 1-based table slot used for a session number
pub fn focus_slot(session_number: u32) -> u32 {
    (session_number % CYCLE_LENGTH) + 1
}

/// Primary/secondary focus for a session under a split
pub fn focus_for(split: SplitType, session_number: u32) -> Focus {
    let table = match split {
        SplitType::FullBody => {
            return Focus {
                primary: FullBody,
                secondary: Cardio,
            }
        }
        SplitType::PushPullLegs => &PUSH_PULL_LEGS,
        SplitType::UpperLower => &UPPER_LOWER,
        SplitType::BroSplit => &BRO_SPLIT,
    };

    let (primary, secondary) = table[(focus_slot(session_number) - 1) as usize];
    Focus { primary, secondary }
}
