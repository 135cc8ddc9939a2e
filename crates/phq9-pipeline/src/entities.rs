//! Entity descriptors for one subject: ten selects and three sensors.

use serde_json::{Map, Value};

use phq9_core::keys;
use phq9_core::models::{
    DifficultyAnswer, EntityDescriptor, InputRole, QuestionAnswer, SensorKind, SeverityBand,
    Subject,
};
use phq9_instruments::Phq9;
use phq9_instruments::instruments::phq9::DIFFICULTY_QUESTION;

pub fn question_text(role: InputRole) -> &'static str {
    match role {
        InputRole::Question(n) => Phq9::question(n),
        InputRole::Difficulty => DIFFICULTY_QUESTION,
    }
}

/// Canonical option keys for an input, default first.
pub fn options(role: InputRole) -> Vec<String> {
    match role {
        InputRole::Question(_) => QuestionAnswer::keys(),
        InputRole::Difficulty => DifficultyAnswer::keys(),
    }
}

/// Map a submitted option (key or display label) to its canonical key.
pub fn canonical_option(role: InputRole, option: &str) -> Option<&'static str> {
    match role {
        InputRole::Question(_) => QuestionAnswer::from_state(option).map(QuestionAnswer::key),
        InputRole::Difficulty => DifficultyAnswer::from_state(option).map(DifficultyAnswer::key),
    }
}

pub fn input_descriptor(subject: &Subject, role: InputRole) -> EntityDescriptor {
    let question = question_text(role);
    let options = options(role);

    let mut attributes = Map::new();
    attributes.insert("question".to_string(), Value::from(question));
    attributes.insert("subject_id".to_string(), Value::from(subject.id.as_str()));

    EntityDescriptor {
        key: keys::input(&subject.id, role),
        object_id: keys::input_object_id(&subject.id, role),
        name: format!("{question} {}", subject.name),
        initial_state: options.first().cloned(),
        options,
        attributes,
    }
}

pub fn sensor_descriptor(subject: &Subject, kind: SensorKind) -> EntityDescriptor {
    let (label, initial_state) = match kind {
        SensorKind::TotalScore => ("PHQ-9 total score", Some("0".to_string())),
        SensorKind::ScoreInterpretation => (
            "PHQ-9 score interpretation",
            Some(SeverityBand::NoneMinimal.as_str().to_string()),
        ),
        SensorKind::LastEvaluated => ("PHQ-9 last evaluated", None),
    };

    let mut attributes = Map::new();
    attributes.insert("subject_id".to_string(), Value::from(subject.id.as_str()));

    EntityDescriptor {
        key: keys::sensor(&subject.id, kind),
        object_id: keys::sensor_object_id(&subject.id, kind),
        name: format!("{label} {}", subject.name),
        options: Vec::new(),
        initial_state,
        attributes,
    }
}

/// All thirteen entities: ten inputs in item order, then the sensors in
/// `SensorKind::ALL` order.
pub fn descriptors(subject: &Subject) -> Vec<EntityDescriptor> {
    InputRole::all()
        .map(|role| input_descriptor(subject, role))
        .chain(SensorKind::ALL.iter().map(|&kind| sensor_descriptor(subject, kind)))
        .collect()
}
