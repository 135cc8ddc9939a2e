pub mod answer;
pub mod entity;
pub mod screening;
pub mod severity;
pub mod subject;

pub use answer::{DifficultyAnswer, QuestionAnswer};
pub use entity::{EntityDescriptor, EntityId, EntityKey, InputRole, Platform, QuestionNumber, SensorKind};
pub use screening::ScreeningSnapshot;
pub use severity::SeverityBand;
pub use subject::{Subject, SubjectId};
