//! Observable session record and the derived phase machine.
//!
//! DESIGN
//! ======
//! The session is a plain value published through a watch channel rather than
//! shared mutable state; observers always read a coherent snapshot and the
//! controller is the only writer.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::principal::Principal;

/// Snapshot of the authentication state published by the controller.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    /// The signed-in principal; `None` means no authenticated user.
    pub current_user: Option<Principal>,
    /// True for the exact duration of one in-flight auth operation.
    pub is_loading: bool,
    /// Message of the most recent failed operation, verbatim from the
    /// provider. Replaced on each new failure; a success leaves it in place.
    pub last_error: Option<String>,
}

/// Lifecycle phase of the session, derived from the snapshot.
///
/// The machine cycles for the life of the process: `SignedOut` moves to
/// `Authenticating` when an operation is invoked, then to `SignedIn` on
/// provider success or back to `SignedOut` on failure. Sign-out returns to
/// `SignedOut` immediately with no intermediate phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// No authenticated principal and nothing in flight.
    SignedOut,
    /// An auth operation is awaiting the provider.
    Authenticating,
    /// A principal is signed in.
    SignedIn,
}

impl Session {
    /// Derive the current phase. Loading takes precedence so observers can
    /// distinguish a re-authentication attempt from a settled session.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.is_loading {
            SessionPhase::Authenticating
        } else if self.current_user.is_some() {
            SessionPhase::SignedIn
        } else {
            SessionPhase::SignedOut
        }
    }
}
