// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits decoupling the orchestrator from its collaborators.

pub mod limiter;
pub mod producer;
pub mod store;

pub use limiter::RateLimiter;
pub use producer::ScriptProducer;
pub use store::ScriptStore;
