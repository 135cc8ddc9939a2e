use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("question number {0} is outside 1..=9")]
    InvalidQuestionNumber(u8),

    #[error("unrecognised answer for {input}: {value:?}")]
    UnknownAnswer { input: String, value: String },

    #[error("subject id must not be empty")]
    EmptySubjectId,
}
