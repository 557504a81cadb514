// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP facades for Relay.
//!
//! Two routers share one listener helper:
//! - [`bridge_router`]: `GET /updates`, `POST /send` with `{ok, ...}` envelopes
//! - [`transcript_router`]: `POST /transcript` with `{detail}` errors

pub mod bridge;
pub mod envelope;
pub mod server;
pub mod transcript;

pub use bridge::bridge_router;
pub use server::{serve, ServerConfig};
pub use transcript::transcript_router;
