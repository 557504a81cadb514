// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Relay integration tests.
//!
//! Provides mock adapters for fast, deterministic, CI-runnable tests without
//! a live messaging account or caption provider.
//!
//! # Components
//!
//! - [`MockMessagingClient`] - Scripted messaging account with call counters
//! - [`MockCaptionSource`] - Caption provider with fixed tracks per video
//! - [`ScriptedPrompt`] - Login prompt answering from canned values

pub mod mock_captions;
pub mod mock_messaging;
pub mod scripted_prompt;

pub use mock_captions::MockCaptionSource;
pub use mock_messaging::{CallCounts, MockMessagingClient, SignInScript};
pub use scripted_prompt::ScriptedPrompt;
