//! Cache error types.

/// A result type returning cache errors.
pub type Result<T> = std::result::Result<T, Error>;

/// A cache error.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The key could not be serialized.
    #[error(transparent)]
    Flexbuffers(#[from] flexbuffers::SerializationError),
}
