use thiserror::Error;

pub type ResourceResult<T> = Result<T, ResourceError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("A response was already sent for this resource request")]
    AlreadySent,
}
