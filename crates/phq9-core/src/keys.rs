//! Entity naming conventions.
//!
//! Pure string functions. These define the deterministic keys under which a
//! subject's inputs and sensors are registered with the host, and the object
//! ids the host uses to build entity ids.

use crate::models::{EntityKey, InputRole, Platform, QuestionNumber, SensorKind, SubjectId};

pub const DOMAIN: &str = "phq9";

fn key(platform: Platform, unique_id: String) -> EntityKey {
    EntityKey {
        platform,
        unique_id,
    }
}

pub fn question(subject: &SubjectId, number: QuestionNumber) -> EntityKey {
    key(Platform::Select, format!("{DOMAIN}_{subject}_{number}"))
}

pub fn difficulty(subject: &SubjectId) -> EntityKey {
    key(Platform::Select, format!("{DOMAIN}_{subject}_difficulty"))
}

pub fn input(subject: &SubjectId, role: InputRole) -> EntityKey {
    match role {
        InputRole::Question(n) => question(subject, n),
        InputRole::Difficulty => difficulty(subject),
    }
}

pub fn total_score(subject: &SubjectId) -> EntityKey {
    key(Platform::Sensor, format!("{DOMAIN}_{subject}_score"))
}

pub fn last_evaluated(subject: &SubjectId) -> EntityKey {
    key(Platform::Sensor, format!("{DOMAIN}_{subject}_last_evaluated"))
}

pub fn score_interpretation(subject: &SubjectId) -> EntityKey {
    key(
        Platform::Sensor,
        format!("{DOMAIN}_{subject}_score_interpretation"),
    )
}

pub fn sensor(subject: &SubjectId, kind: SensorKind) -> EntityKey {
    match kind {
        SensorKind::TotalScore => total_score(subject),
        SensorKind::ScoreInterpretation => score_interpretation(subject),
        SensorKind::LastEvaluated => last_evaluated(subject),
    }
}

/// The nine scored inputs, in item order.
pub fn question_keys(subject: &SubjectId) -> Vec<EntityKey> {
    QuestionNumber::all().map(|n| question(subject, n)).collect()
}

/// All ten inputs: nine questions then difficulty.
pub fn input_keys(subject: &SubjectId) -> Vec<EntityKey> {
    InputRole::all().map(|r| input(subject, r)).collect()
}

pub fn input_object_id(subject: &SubjectId, role: InputRole) -> String {
    match role {
        InputRole::Question(n) => format!("{DOMAIN}_{subject}_q{n}"),
        InputRole::Difficulty => format!("{DOMAIN}_{subject}_difficulty"),
    }
}

pub fn sensor_object_id(subject: &SubjectId, kind: SensorKind) -> String {
    match kind {
        SensorKind::TotalScore => format!("{DOMAIN}_{subject}_score"),
        SensorKind::ScoreInterpretation => format!("{DOMAIN}_{subject}_score_interpretation"),
        SensorKind::LastEvaluated => format!("{DOMAIN}_{subject}_last_evaluated"),
    }
}
