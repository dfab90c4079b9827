//! Resolution of numeric VCX error codes to diagnostic strings.
//!
//! The numbering is the error table published by the credential exchange
//! library and shared with every language binding; codes are never renumbered
//! or reworded here. The table is built once and immutable for the process
//! lifetime, so lookups are safe from any thread without synchronization.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

use crate::errors::VcxError;

/// Message returned for codes outside the enumerated table.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown Error";

/// Error codes from the shared VCX error table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    UnknownError = 1001,
    ConnectionError = 1002,
    InvalidConnectionHandle = 1003,
    InvalidConfiguration = 1004,
    NotReady = 1005,
    NoEndpoint = 1006,
    InvalidOption = 1007,
    InvalidDid = 1008,
    InvalidVerkey = 1009,
    PostMsgFailure = 1010,
    InvalidNonce = 1011,
    InvalidUrl = 1013,
    NotBase58 = 1014,
    InvalidIssuerCredentialHandle = 1015,
    InvalidJson = 1016,
    InvalidProofHandle = 1017,
    InvalidCredentialRequest = 1018,
    InvalidMsgPack = 1019,
    InvalidAttributesStructure = 1021,
    InvalidProof = 1023,
    InvalidGenesisTxnPath = 1024,
    AlreadyInitialized = 1044,
    InvalidInviteDetails = 1045,
}

static MESSAGES: Lazy<HashMap<u32, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert(ErrorCode::Success as u32, "Success");
    map.insert(ErrorCode::UnknownError as u32, UNKNOWN_ERROR_MESSAGE);
    map.insert(ErrorCode::ConnectionError as u32, "Error with Connection");
    map.insert(
        ErrorCode::InvalidConnectionHandle as u32,
        "Invalid Connection Handle",
    );
    map.insert(ErrorCode::InvalidConfiguration as u32, "Invalid Configuration");
    map.insert(
        ErrorCode::NotReady as u32,
        "Object not ready for specified action",
    );
    map.insert(
        ErrorCode::NoEndpoint as u32,
        "No Endpoint set for Connection Object",
    );
    map.insert(ErrorCode::InvalidOption as u32, "Invalid Option");
    map.insert(ErrorCode::InvalidDid as u32, "Invalid DID");
    map.insert(ErrorCode::InvalidVerkey as u32, "Invalid VERKEY");
    map.insert(ErrorCode::PostMsgFailure as u32, "Message failed in post");
    map.insert(ErrorCode::InvalidNonce as u32, "Invalid NONCE");
    map.insert(ErrorCode::InvalidUrl as u32, "Invalid URL");
    map.insert(ErrorCode::NotBase58 as u32, "Value needs to be base58");
    map.insert(
        ErrorCode::InvalidIssuerCredentialHandle as u32,
        "Invalid Credential Issuer Handle",
    );
    map.insert(ErrorCode::InvalidJson as u32, "Invalid JSON string");
    map.insert(ErrorCode::InvalidProofHandle as u32, "Invalid Proof Handle");
    map.insert(
        ErrorCode::InvalidCredentialRequest as u32,
        "Invalid Credential Request",
    );
    map.insert(ErrorCode::InvalidMsgPack as u32, "Invalid MessagePack");
    map.insert(
        ErrorCode::InvalidAttributesStructure as u32,
        "Attributes provided to Credential Offer are not correct, possibly malformed",
    );
    map.insert(ErrorCode::InvalidProof as u32, "Proof had invalid format");
    map.insert(
        ErrorCode::InvalidGenesisTxnPath as u32,
        "Must have valid genesis txn file path",
    );
    map.insert(
        ErrorCode::AlreadyInitialized as u32,
        "Library already initialized",
    );
    map.insert(
        ErrorCode::InvalidInviteDetails as u32,
        "Invalid invite details structure",
    );
    map
});

/// Resolve a numeric error code to its diagnostic string.
///
/// Codes outside the enumerated table resolve to [`UNKNOWN_ERROR_MESSAGE`]
/// rather than failing, so a foreign or future code can never panic a caller.
pub fn error_message(code: u32) -> &'static str {
    MESSAGES.get(&code).copied().unwrap_or(UNKNOWN_ERROR_MESSAGE)
}

impl ErrorCode {
    /// Numeric value of this code.
    pub fn as_code(&self) -> u32 {
        *self as u32
    }

    /// Diagnostic string for this code.
    pub fn message(&self) -> &'static str {
        error_message(*self as u32)
    }

    /// Try to resolve a numeric value back to an enumerated code.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(ErrorCode::Success),
            1001 => Some(ErrorCode::UnknownError),
            1002 => Some(ErrorCode::ConnectionError),
            1003 => Some(ErrorCode::InvalidConnectionHandle),
            1004 => Some(ErrorCode::InvalidConfiguration),
            1005 => Some(ErrorCode::NotReady),
            1006 => Some(ErrorCode::NoEndpoint),
            1007 => Some(ErrorCode::InvalidOption),
            1008 => Some(ErrorCode::InvalidDid),
            1009 => Some(ErrorCode::InvalidVerkey),
            1010 => Some(ErrorCode::PostMsgFailure),
            1011 => Some(ErrorCode::InvalidNonce),
            1013 => Some(ErrorCode::InvalidUrl),
            1014 => Some(ErrorCode::NotBase58),
            1015 => Some(ErrorCode::InvalidIssuerCredentialHandle),
            1016 => Some(ErrorCode::InvalidJson),
            1017 => Some(ErrorCode::InvalidProofHandle),
            1018 => Some(ErrorCode::InvalidCredentialRequest),
            1019 => Some(ErrorCode::InvalidMsgPack),
            1021 => Some(ErrorCode::InvalidAttributesStructure),
            1023 => Some(ErrorCode::InvalidProof),
            1024 => Some(ErrorCode::InvalidGenesisTxnPath),
            1044 => Some(ErrorCode::AlreadyInitialized),
            1045 => Some(ErrorCode::InvalidInviteDetails),
            _ => None,
        }
    }

    /// All enumerated codes.
    pub fn all() -> Vec<ErrorCode> {
        vec![
            ErrorCode::Success,
            ErrorCode::UnknownError,
            ErrorCode::ConnectionError,
            ErrorCode::InvalidConnectionHandle,
            ErrorCode::InvalidConfiguration,
            ErrorCode::NotReady,
            ErrorCode::NoEndpoint,
            ErrorCode::InvalidOption,
            ErrorCode::InvalidDid,
            ErrorCode::InvalidVerkey,
            ErrorCode::PostMsgFailure,
            ErrorCode::InvalidNonce,
            ErrorCode::InvalidUrl,
            ErrorCode::NotBase58,
            ErrorCode::InvalidIssuerCredentialHandle,
            ErrorCode::InvalidJson,
            ErrorCode::InvalidProofHandle,
            ErrorCode::InvalidCredentialRequest,
            ErrorCode::InvalidMsgPack,
            ErrorCode::InvalidAttributesStructure,
            ErrorCode::InvalidProof,
            ErrorCode::InvalidGenesisTxnPath,
            ErrorCode::AlreadyInitialized,
            ErrorCode::InvalidInviteDetails,
        ]
    }
}

// This allows: let code: ErrorCode = 1005u32.try_into().unwrap();
impl TryFrom<u32> for ErrorCode {
    type Error = VcxError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(VcxError::UnknownErrorCode(code))
    }
}

// This allows: format!("{}", code)
impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
