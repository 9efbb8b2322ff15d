pub mod error;
pub mod model;

pub use error::AppError;
pub use model::{
    DownloadPhase, ResolutionResult, SessionState, SourceRequest, TransferResult,
    DEFAULT_FILENAME,
};
