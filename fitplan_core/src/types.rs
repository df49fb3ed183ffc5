//! Core domain types for fitplan.
//!
//! This module defines the fundamental types used throughout the system:
//! - User profiles and their goal/experience labels
//! - Split archetypes and muscle-group labels (coarse focus and fine tags)
//! - Catalog exercises and time quantities
//! - Generated sessions, sections and plans

use crate::config::DefaultsConfig;
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Profile Types
// ============================================================================

/// Training goal stated by the user
///
/// Unrecognized labels are kept verbatim in `Other` and planned as a
/// full-body program rather than rejected.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Goal {
    MuscleGain,
    FatLoss,
    Strength,
    Endurance,
    GeneralFitness,
    Other(String),
}

impl Goal {
    pub fn as_str(&self) -> &str {
        match self {
            Goal::MuscleGain => "muscle_gain",
            Goal::FatLoss => "fat_loss",
            Goal::Strength => "strength",
            Goal::Endurance => "endurance",
            Goal::GeneralFitness => "general_fitness",
            Goal::Other(label) => label,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Goal::MuscleGain => "Muscle Gain",
            Goal::FatLoss => "Fat Loss",
            Goal::Strength => "Strength",
            Goal::Endurance => "Endurance",
            Goal::GeneralFitness => "General Fitness",
            Goal::Other(label) => label,
        }
    }
}

impl From<String> for Goal {
    fn from(label: String) -> Self {
        match label.as_str() {
            "muscle_gain" => Goal::MuscleGain,
            "fat_loss" => Goal::FatLoss,
            "strength" => Goal::Strength,
            "endurance" => Goal::Endurance,
            "general_fitness" => Goal::GeneralFitness,
            _ => Goal::Other(label),
        }
    }
}

impl From<Goal> for String {
    fn from(goal: Goal) -> Self {
        match goal {
            Goal::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Training experience level
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Experience {
    Beginner,
    Intermediate,
    Advanced,
}

impl Experience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Experience::Beginner => "beginner",
            Experience::Intermediate => "intermediate",
            Experience::Advanced => "advanced",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Experience::Beginner => "Beginner",
            Experience::Intermediate => "Intermediate",
            Experience::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Experience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Experience {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Experience::Beginner),
            "intermediate" => Ok(Experience::Intermediate),
            "advanced" => Ok(Experience::Advanced),
            other => Err(Error::InvalidProfile(format!(
                "unknown experience level '{}'",
                other
            ))),
        }
    }
}

/// A validated user profile, the only input the engine plans from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub goal: Goal,
    pub experience: Experience,
    pub equipment: Vec<String>,
    pub days_per_week: u32,
}

impl Profile {
    /// Check the invariants the engine relies on
    ///
    /// The engine divides by `days_per_week` and filters on `equipment`, so
    /// both must be usable before any session is composed.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidProfile("name must not be empty".into()));
        }
        if self.age == 0 {
            return Err(Error::InvalidProfile("age must be positive".into()));
        }
        if self.days_per_week == 0 {
            return Err(Error::InvalidProfile(
                "days_per_week must be at least 1".into(),
            ));
        }
        if self.equipment.is_empty() {
            return Err(Error::InvalidProfile(
                "equipment must list at least one item".into(),
            ));
        }
        Ok(())
    }
}

/// Profile as it arrives from a caller, before required fields are checked
/// and defaults are filled in
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProfileRequest {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub goal: Option<Goal>,
    pub experience: Option<Experience>,
    pub equipment: Option<Vec<String>>,
    pub days_per_week: Option<u32>,
}

impl ProfileRequest {
    /// Resolve into a [`Profile`], applying configured defaults for the
    /// optional fields
    pub fn into_profile(self, defaults: &DefaultsConfig) -> Result<Profile> {
        let mut missing = Vec::new();
        if self.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
            missing.push("name".to_string());
        }
        if self.age.map_or(true, |a| a == 0) {
            missing.push("age".to_string());
        }
        if self.gender.as_deref().map_or(true, |g| g.trim().is_empty()) {
            missing.push("gender".to_string());
        }
        if self.goal.is_none() {
            missing.push("goal".to_string());
        }
        if self.experience.is_none() {
            missing.push("experience".to_string());
        }

        match (self.name, self.age, self.gender, self.goal, self.experience) {
            (Some(name), Some(age), Some(gender), Some(goal), Some(experience))
                if missing.is_empty() =>
            {
                let profile = Profile {
                    name,
                    age,
                    gender,
                    goal,
                    experience,
                    equipment: self
                        .equipment
                        .unwrap_or_else(|| defaults.equipment.clone()),
                    days_per_week: self.days_per_week.unwrap_or(defaults.days_per_week),
                };
                profile.validate()?;
                Ok(profile)
            }
            _ => Err(Error::MissingFields(missing)),
        }
    }
}

// ============================================================================
// Split and Muscle Group Types
// ============================================================================

/// Weekly split archetype governing which muscles each session trains
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitType {
    FullBody,
    PushPullLegs,
    UpperLower,
    BroSplit,
}

impl SplitType {
    pub fn display_name(&self) -> &'static str {
        match self {
            SplitType::FullBody => "Full Body",
            SplitType::PushPullLegs => "Push/Pull/Legs",
            SplitType::UpperLower => "Upper/Lower",
            SplitType::BroSplit => "Bro Split",
        }
    }
}

/// Coarse focus label assigned to a session
///
/// Expanded into fine [`MuscleGroup`] tags through the taxonomy in
/// [`crate::catalog`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleLabel {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
    FullBody,
    Cardio,
    Triceps,
    Biceps,
    Traps,
    Forearms,
}

impl MuscleLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MuscleLabel::Chest => "chest",
            MuscleLabel::Back => "back",
            MuscleLabel::Legs => "legs",
            MuscleLabel::Shoulders => "shoulders",
            MuscleLabel::Arms => "arms",
            MuscleLabel::Core => "core",
            MuscleLabel::FullBody => "full_body",
            MuscleLabel::Cardio => "cardio",
            MuscleLabel::Triceps => "triceps",
            MuscleLabel::Biceps => "biceps",
            MuscleLabel::Traps => "traps",
            MuscleLabel::Forearms => "forearms",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MuscleLabel::Chest => "Chest",
            MuscleLabel::Back => "Back",
            MuscleLabel::Legs => "Legs",
            MuscleLabel::Shoulders => "Shoulders",
            MuscleLabel::Arms => "Arms",
            MuscleLabel::Core => "Core",
            MuscleLabel::FullBody => "Full Body",
            MuscleLabel::Cardio => "Cardio",
            MuscleLabel::Triceps => "Triceps",
            MuscleLabel::Biceps => "Biceps",
            MuscleLabel::Traps => "Traps",
            MuscleLabel::Forearms => "Forearms",
        }
    }
}

impl fmt::Display for MuscleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fine-grained muscle tag carried by catalog exercises
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Shoulders,
    Triceps,
    Back,
    Biceps,
    RearDeltoids,
    Quadriceps,
    Hamstrings,
    Calves,
    Glutes,
    Traps,
    Forearms,
    Abs,
    Obliques,
    LowerBack,
    FullBody,
    Cardio,
}

/// Primary and secondary emphasis of one session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Focus {
    pub primary: MuscleLabel,
    pub secondary: MuscleLabel,
}

// ============================================================================
// Exercise Types
// ============================================================================

/// Which block of a session an exercise belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Warmup,
    Main,
    Cooldown,
}

impl FromStr for Phase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "warmup" | "warm-up" => Ok(Phase::Warmup),
            "main" => Ok(Phase::Main),
            "cooldown" | "cool-down" => Ok(Phase::Cooldown),
            other => Err(Error::Other(format!("unknown phase '{}'", other))),
        }
    }
}

/// Unit of a [`TimeSpan`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Seconds,
    Minutes,
}

/// A rest or duration quantity
///
/// Kept numeric everywhere inside the engine; rendered as "60 seconds" or
/// "5 minutes" only when displayed or serialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimeSpan {
    pub amount: u32,
    pub unit: TimeUnit,
}

impl TimeSpan {
    pub const fn seconds(amount: u32) -> Self {
        Self {
            amount,
            unit: TimeUnit::Seconds,
        }
    }

    pub const fn minutes(amount: u32) -> Self {
        Self {
            amount,
            unit: TimeUnit::Minutes,
        }
    }

    pub fn as_seconds(&self) -> u32 {
        match self.unit {
            TimeUnit::Seconds => self.amount,
            TimeUnit::Minutes => self.amount * 60,
        }
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match (self.unit, self.amount) {
            (TimeUnit::Seconds, 1) => "second",
            (TimeUnit::Seconds, _) => "seconds",
            (TimeUnit::Minutes, 1) => "minute",
            (TimeUnit::Minutes, _) => "minutes",
        };
        write!(f, "{} {}", self.amount, unit)
    }
}

impl Serialize for TimeSpan {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// An immutable catalog entry
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogExercise {
    pub name: String,
    pub phase: Phase,
    pub muscle_group: MuscleGroup,
    pub equipment: Vec<String>,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub rest: Option<TimeSpan>,
    pub duration: Option<TimeSpan>,
}

impl CatalogExercise {
    /// True when any required piece of equipment is owned
    pub fn usable_with(&self, owned: &[String]) -> bool {
        self.equipment.iter().any(|eq| owned.contains(eq))
    }
}

/// An exercise as prescribed inside a session
///
/// Always an owned copy; adjusting it never touches the catalog entry it
/// was taken from.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionExercise {
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub equipment: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest: Option<TimeSpan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<TimeSpan>,
}

impl From<&CatalogExercise> for SessionExercise {
    fn from(entry: &CatalogExercise) -> Self {
        Self {
            name: entry.name.clone(),
            muscle_group: entry.muscle_group,
            equipment: entry.equipment.clone(),
            sets: entry.sets,
            reps: entry.reps,
            rest: entry.rest,
            duration: entry.duration,
        }
    }
}

// ============================================================================
// Session and Plan Types
// ============================================================================

/// One exercise slot in a circuit
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CircuitExercise {
    pub name: String,
    pub reps: u32,
    pub time: TimeSpan,
}

/// Rotation-style block performed back-to-back for several rounds
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CircuitBlock {
    pub rounds: u32,
    pub rest_between_exercises: TimeSpan,
    pub rest_between_rounds: TimeSpan,
    pub exercises: Vec<CircuitExercise>,
}

/// Paired block: one primary-focus and one secondary-focus exercise
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SupersetBlock {
    pub name: String,
    pub rounds: u32,
    pub exercises: Vec<SessionExercise>,
}

/// All blocks of a session
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Sections {
    pub warmup: Vec<SessionExercise>,
    pub main: Vec<SessionExercise>,
    pub cooldown: Vec<SessionExercise>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuit: Option<CircuitBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superset: Option<Vec<SupersetBlock>>,
}

/// A single dated workout
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Session {
    /// 1-based position within the plan
    #[serde(rename = "session")]
    pub session_number: u32,
    #[serde(serialize_with = "serialize_session_date")]
    pub date: NaiveDate,
    pub focus: Focus,
    pub sections: Sections,
}

fn serialize_session_date<S: Serializer>(
    date: &NaiveDate,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&crate::schedule::format_date(*date))
}

/// A complete generated program
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: Uuid,
    pub user: Profile,
    pub workout_split: SplitType,
    pub sessions: Vec<Session>,
    pub created_at: DateTime<Utc>,
}
