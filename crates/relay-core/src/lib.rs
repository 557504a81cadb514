// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Relay facades.
//!
//! This crate provides the trait seams to the external messaging account and
//! caption provider, the shared error type, and the types passed across them.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{CaptionFailure, RelayError};
pub use types::{MessageView, RemoteMessage, ResolvedPeer};

pub use traits::{CaptionSource, LoginPrompt, MessagingClient};
