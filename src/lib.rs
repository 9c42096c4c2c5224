//! Session and authentication state controller for client applications.
//!
//! This crate owns the "who is signed in" question for an app front-end. The
//! [`controller::SessionController`] bridges UI intents (sign in, sign up,
//! guest sign-in, sign out) to an external identity provider and publishes
//! observable state — current user, loading flag, last error — through a
//! `tokio::sync::watch` channel so screens can re-render reactively. The
//! provider itself sits behind the [`provider::IdentityProvider`] trait; two
//! implementations ship here and applications may bring their own.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | The [`controller::SessionController`] and its operations |
//! | [`session`] | Observable [`session::Session`] record and phase machine |
//! | [`principal`] | Authenticated identity record |
//! | [`provider`] | Identity-provider trait and error type |
//! | [`memory`] | In-process provider for development and tests |
//! | [`rest`] | HTTP provider speaking a Firebase-style accounts API |

pub mod controller;
pub mod memory;
pub mod principal;
pub mod provider;
pub mod rest;
pub mod session;

pub use controller::SessionController;
pub use principal::Principal;
pub use provider::{IdentityProvider, ProviderError};
pub use session::{Session, SessionPhase};
