use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid entity reference '{reference}': {reason}")]
    InvalidReference { reference: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
