// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams to the external services behind the Relay facades.
//!
//! All traits use `#[async_trait]` so they can be held as trait objects.

pub mod captions;
pub mod messaging;
pub mod prompt;

pub use captions::CaptionSource;
pub use messaging::MessagingClient;
pub use prompt::LoginPrompt;
