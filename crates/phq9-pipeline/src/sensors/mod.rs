pub mod interpretation;
pub mod last_evaluated;
pub mod total_score;

pub use interpretation::ScoreInterpretationSensor;
pub use last_evaluated::LastEvaluatedSensor;
pub use total_score::TotalScoreSensor;
