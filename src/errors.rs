use thiserror::Error;

use crate::vcx::error_code::ErrorCode;

/// Result type used by all fallible operations in this crate.
pub type VcxResult<T> = Result<T, VcxError>;

#[derive(Error, Debug)]
pub enum VcxError {
    #[error("Library already initialized")]
    AlreadyInitialized,

    #[error("Library initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Invalid Configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid JSON string: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Object not ready for specified action")]
    NotReady,

    #[error("Invalid Option: {0}")]
    InvalidOption(String),

    #[error("Invalid DID: {0}")]
    InvalidDid(String),

    #[error("Invalid VERKEY: {0}")]
    InvalidVerkey(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unknown error code: {0}")]
    UnknownErrorCode(u32),
}

impl VcxError {
    /// Numeric code for this error in the shared VCX error table.
    pub fn code(&self) -> ErrorCode {
        match self {
            VcxError::AlreadyInitialized => ErrorCode::AlreadyInitialized,
            VcxError::InitializationFailed(_) => ErrorCode::UnknownError,
            VcxError::InvalidConfiguration(_) => ErrorCode::InvalidConfiguration,
            VcxError::InvalidJson(_) => ErrorCode::InvalidJson,
            VcxError::NotReady => ErrorCode::NotReady,
            VcxError::InvalidOption(_) => ErrorCode::InvalidOption,
            VcxError::InvalidDid(_) => ErrorCode::InvalidDid,
            VcxError::InvalidVerkey(_) => ErrorCode::InvalidVerkey,
            VcxError::InvalidUrl(_) => ErrorCode::InvalidUrl,
            VcxError::UnknownErrorCode(_) => ErrorCode::UnknownError,
        }
    }
}
