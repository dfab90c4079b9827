//! VCX (Verifiable Credential Exchange) library core in Rust.
//!
//! This crate carries the process-wide initialization gate of the credential
//! exchange library and the resolver that maps its numeric error codes to
//! diagnostic strings. Credential issuance, proof presentation, wallet and
//! connection handling live in the layers above and may only be driven once
//! the gate reports ready.

// Error handling module
mod errors;
// Lifecycle gate, configuration and error code table
pub mod vcx;

// Re-export Error type
pub use errors::VcxError;
pub use errors::VcxResult;
pub use vcx::error_code::{error_message, ErrorCode};
pub use vcx::init::{
    ensure_ready, init, init_from_file, init_test_mode, init_with_config, shutdown, state,
    version, InitMode, Library,
};
pub use vcx::state::LibraryState;
