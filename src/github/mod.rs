pub mod diff;
pub mod facade;

pub use diff::{ChangedFile, FileStatus};
pub use facade::GitHubFacade;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FacadeError {
    #[error("github facade is not initialized: the request source is not GitHub")]
    NotInitialized,

    #[error("pull request payload is missing field '{0}'")]
    MissingField(&'static str),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
