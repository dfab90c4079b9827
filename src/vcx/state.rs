//! Process lifecycle flag for the initialization gate.

use std::fmt;
use std::sync::Mutex;

use crate::errors::{VcxError, VcxResult};

/// Lifecycle of the library within a process.
///
/// The flag advances Uninitialized -> Initializing -> Ready exactly once per
/// process run. Failed is terminal: once native setup has failed the process
/// must be restarted before the library can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryState {
    Uninitialized,
    Initializing,
    Ready,
    Failed,
}

impl LibraryState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LibraryState::Uninitialized => "Uninitialized",
            LibraryState::Initializing => "Initializing",
            LibraryState::Ready => "Ready",
            LibraryState::Failed => "Failed",
        }
    }
}

impl fmt::Display for LibraryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for LibraryState {
    fn default() -> Self {
        LibraryState::Uninitialized
    }
}

/// Outcome of asking the gate for admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Admission {
    /// Caller won the transition and must finish with `complete` or `fail`.
    Proceed,
    /// Gate is already open; test mode treats this as a no-op success.
    AlreadyReady,
}

/// Guarded lifecycle flag.
///
/// All inspection and advancement happens under the mutex; the lock is never
/// held across a suspension point, so a concurrent initializer observes
/// `Initializing` and is turned away instead of waiting.
#[derive(Debug, Default)]
pub struct InitGate {
    state: Mutex<LibraryState>,
}

impl InitGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> LibraryState {
        *self.state.lock().expect("library state lock poisoned")
    }

    /// Ask for admission to perform the one-time setup.
    ///
    /// Exactly one caller per process run receives `Proceed`. A repeated
    /// test-mode call against an open gate receives `AlreadyReady` so test
    /// suites can re-enter freely; every other repeat is `AlreadyInitialized`.
    pub(crate) fn begin(&self, test_mode: bool) -> VcxResult<Admission> {
        let mut state = self.state.lock().expect("library state lock poisoned");
        match *state {
            LibraryState::Uninitialized => {
                *state = LibraryState::Initializing;
                Ok(Admission::Proceed)
            }
            LibraryState::Ready if test_mode => Ok(Admission::AlreadyReady),
            LibraryState::Ready | LibraryState::Initializing => Err(VcxError::AlreadyInitialized),
            LibraryState::Failed => Err(VcxError::InitializationFailed(
                "previous initialization failed, restart the process".to_string(),
            )),
        }
    }

    /// Setup finished, open the gate.
    pub(crate) fn complete(&self) {
        let mut state = self.state.lock().expect("library state lock poisoned");
        *state = LibraryState::Ready;
    }

    /// Native setup failed. Terminal until process restart.
    pub(crate) fn fail(&self) {
        let mut state = self.state.lock().expect("library state lock poisoned");
        *state = LibraryState::Failed;
    }

    /// Close an open gate again (shutdown). Failed stays Failed.
    pub(crate) fn reset(&self) {
        let mut state = self.state.lock().expect("library state lock poisoned");
        if *state != LibraryState::Failed {
            *state = LibraryState::Uninitialized;
        }
    }
}
