#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodeError {
    #[error("unknown status code: {0}")]
    Status(u8),
    #[error("unknown event code: {0}")]
    Event(u8),
}
