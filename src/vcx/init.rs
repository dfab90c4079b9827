//! One-time library initialization.
//!
//! Initialization is modeled as a single code path taking a tagged
//! [`InitMode`]; the test harness variant travels the same path as a real
//! configuration payload and differs only in skipping native resource
//! acquisition.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use once_cell::sync::Lazy;
use tracing::{debug, error, info};

use crate::errors::{VcxError, VcxResult};
use crate::vcx::settings::Settings;
use crate::vcx::state::{Admission, InitGate, LibraryState};

/// How the initialization gate acquires its configuration.
#[derive(Debug, Clone)]
pub enum InitMode {
    /// Real setup with library defaults.
    Standard,
    /// Real setup driven by a JSON configuration payload.
    Config(String),
    /// Real setup driven by a configuration file.
    ConfigFile(PathBuf),
    /// Test harness variant, skips native resource acquisition.
    Test,
}

/// Owned library context: the lifecycle gate plus the active configuration.
///
/// A single process-wide instance backs the public `init*` family. Fresh
/// instances can be constructed for deterministic tests that need a virgin
/// gate without touching process state.
#[derive(Debug, Default)]
pub struct Library {
    gate: InitGate,
    settings: RwLock<Option<Settings>>,
}

static LIBRARY: Lazy<Library> = Lazy::new(Library::default);

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LibraryState {
        self.gate.current()
    }

    /// Copy of the configuration the library was initialized with, if any.
    pub fn settings(&self) -> Option<Settings> {
        self.settings
            .read()
            .expect("settings lock poisoned")
            .clone()
    }

    /// Guard for operations that require an initialized library.
    ///
    /// # Errors
    ///
    /// Returns `NotReady` while the gate is closed.
    pub fn ensure_ready(&self) -> VcxResult<()> {
        match self.gate.current() {
            LibraryState::Ready => Ok(()),
            _ => Err(VcxError::NotReady),
        }
    }

    /// Drive the gate from Uninitialized to Ready.
    ///
    /// The configuration is resolved before the gate moves, so a rejected
    /// payload leaves the state Uninitialized and the call retryable. Native
    /// setup failure is terminal (state Failed). A repeated test-mode call
    /// against an open gate is a no-op success.
    pub async fn initialize(&self, mode: InitMode) -> VcxResult<()> {
        let settings = match &mode {
            InitMode::Standard => Settings::default(),
            InitMode::Config(payload) => Settings::from_json(payload)?,
            InitMode::ConfigFile(path) => Settings::from_json(&read_config_file(path).await?)?,
            InitMode::Test => Settings::test_mode(),
        };
        let test_mode = matches!(mode, InitMode::Test) || settings.is_test_mode();

        match self.gate.begin(test_mode)? {
            Admission::AlreadyReady => {
                debug!("repeated test mode initialization, library already ready");
                return Ok(());
            }
            Admission::Proceed => {}
        }

        if test_mode {
            debug!("test mode enabled, skipping native resource acquisition");
        } else if let Err(err) = acquire_native_resources().await {
            self.gate.fail();
            error!("library initialization failed: {}", err);
            return Err(err);
        }

        {
            let mut slot = self.settings.write().expect("settings lock poisoned");
            *slot = Some(settings);
        }
        self.gate.complete();
        info!("library initialized, state={}", self.gate.current());
        Ok(())
    }

    /// Clear the configuration and close the gate so the library can be
    /// initialized again. Meant for test harnesses and embedding bindings; a
    /// Failed gate stays Failed.
    pub fn shutdown(&self) {
        {
            let mut slot = self.settings.write().expect("settings lock poisoned");
            *slot = None;
        }
        self.gate.reset();
        info!("library shut down, state={}", self.gate.current());
    }
}

/// One-time setup of the native crypto provider.
async fn acquire_native_resources() -> VcxResult<()> {
    if sodiumoxide::init().is_err() {
        return Err(VcxError::InitializationFailed(
            "failed to initialize sodium crypto provider".to_string(),
        ));
    }
    Ok(())
}

async fn read_config_file(path: &Path) -> VcxResult<String> {
    tokio::fs::read_to_string(path).await.map_err(|err| {
        VcxError::InvalidConfiguration(format!(
            "cannot read configuration file {}: {}",
            path.display(),
            err
        ))
    })
}

/// Initialize the VCX library with defaults.
pub async fn init() -> VcxResult<()> {
    LIBRARY.initialize(InitMode::Standard).await
}

/// Initialize the VCX library from a JSON configuration payload.
pub async fn init_with_config(config: &str) -> VcxResult<()> {
    LIBRARY.initialize(InitMode::Config(config.to_string())).await
}

/// Initialize the VCX library from a configuration file.
pub async fn init_from_file(path: impl AsRef<Path>) -> VcxResult<()> {
    LIBRARY
        .initialize(InitMode::ConfigFile(path.as_ref().to_path_buf()))
        .await
}

/// Initialize the VCX library in test mode. Idempotent within a process.
pub async fn init_test_mode() -> VcxResult<()> {
    LIBRARY.initialize(InitMode::Test).await
}

/// Close the gate on the process-wide library instance.
pub fn shutdown() {
    LIBRARY.shutdown()
}

/// Current lifecycle state of the process-wide library instance.
pub fn state() -> LibraryState {
    LIBRARY.state()
}

/// Guard against use of the process-wide library before initialization.
pub fn ensure_ready() -> VcxResult<()> {
    LIBRARY.ensure_ready()
}

/// Version of this library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_test_mode_is_idempotent() {
        let library = Library::new();
        assert!(library.initialize(InitMode::Test).await.is_ok());
        assert_eq!(library.state(), LibraryState::Ready);
        assert!(library.initialize(InitMode::Test).await.is_ok());
        assert_eq!(library.state(), LibraryState::Ready);
    }

    #[tokio::test]
    async fn test_standard_init_then_reinit_fails() {
        let library = Library::new();
        assert!(library.initialize(InitMode::Standard).await.is_ok());
        assert_eq!(library.state(), LibraryState::Ready);
        let repeat = library.initialize(InitMode::Standard).await;
        assert!(matches!(repeat, Err(VcxError::AlreadyInitialized)));
    }

    #[tokio::test]
    async fn test_invalid_config_leaves_gate_closed() {
        let library = Library::new();

        let empty = library.initialize(InitMode::Config(String::new())).await;
        assert!(matches!(empty, Err(VcxError::InvalidConfiguration(_))));
        assert_eq!(library.state(), LibraryState::Uninitialized);

        let broken = library
            .initialize(InitMode::Config("{\"agency_did\":".to_string()))
            .await;
        assert!(matches!(broken, Err(VcxError::InvalidJson(_))));
        assert_eq!(library.state(), LibraryState::Uninitialized);

        // the gate stayed retryable
        assert!(library.initialize(InitMode::Test).await.is_ok());
        assert_eq!(library.state(), LibraryState::Ready);
    }

    #[tokio::test]
    async fn test_config_payload_can_select_test_mode() {
        let library = Library::new();
        let payload = r#"{"enable_test_mode": "true"}"#;
        assert!(library
            .initialize(InitMode::Config(payload.to_string()))
            .await
            .is_ok());
        // test mode via config is idempotent like the dedicated variant
        assert!(library
            .initialize(InitMode::Config(payload.to_string()))
            .await
            .is_ok());
        assert!(library.settings().expect("settings stored").is_test_mode());
    }

    #[tokio::test]
    async fn test_init_from_config_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{"enable_test_mode": "true", "institution_name": "Faber"}}"#
        )
        .expect("write config");

        let library = Library::new();
        assert!(library
            .initialize(InitMode::ConfigFile(file.path().to_path_buf()))
            .await
            .is_ok());
        let settings = library.settings().expect("settings stored");
        assert_eq!(settings.institution_name.as_deref(), Some("Faber"));
    }

    #[tokio::test]
    async fn test_missing_config_file_is_invalid_configuration() {
        let library = Library::new();
        let missing = library
            .initialize(InitMode::ConfigFile(PathBuf::from(
                "/nonexistent/vcx-config.json",
            )))
            .await;
        assert!(matches!(missing, Err(VcxError::InvalidConfiguration(_))));
        assert_eq!(library.state(), LibraryState::Uninitialized);
    }

    #[tokio::test]
    async fn test_shutdown_reopens_gate() {
        let library = Library::new();
        assert!(library.initialize(InitMode::Test).await.is_ok());
        library.shutdown();
        assert_eq!(library.state(), LibraryState::Uninitialized);
        assert!(library.settings().is_none());
        assert!(library.initialize(InitMode::Test).await.is_ok());
    }

    #[tokio::test]
    async fn test_ensure_ready_guards_until_initialized() {
        let library = Library::new();
        let guarded = library.ensure_ready();
        assert!(matches!(guarded, Err(VcxError::NotReady)));
        assert_eq!(
            guarded.unwrap_err().to_string(),
            "Object not ready for specified action"
        );

        library.initialize(InitMode::Test).await.expect("init");
        assert!(library.ensure_ready().is_ok());
    }

    #[test]
    fn test_version_is_crate_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
