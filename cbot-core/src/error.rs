use thiserror::Error;

#[derive(Error, Debug)]
pub enum CbotError {
    /// Delivery to or from the messaging transport failed.
    #[error("Transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, CbotError>;
