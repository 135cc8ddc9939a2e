use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("{instrument} expects {expected} answers, got {actual}")]
    AnswerCount {
        instrument: String,
        expected: usize,
        actual: usize,
    },
}
