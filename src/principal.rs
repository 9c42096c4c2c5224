//! Authenticated identity record returned by identity providers.

#[cfg(test)]
#[path = "principal_test.rs"]
mod principal_test;

use serde::{Deserialize, Serialize};

/// An authenticated identity: the provider's unique id plus whatever profile
/// fields it reported. Guest (anonymous) principals carry an id only.
///
/// Guest sessions are deliberately not marked distinctly — callers that need
/// to gate features on account type must track that themselves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    /// Provider-assigned unique identifier.
    pub id: String,
    /// Display name, if the provider reported one.
    pub display_name: Option<String>,
    /// Email address, if the provider reported one.
    pub email: Option<String>,
}
