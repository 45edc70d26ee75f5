// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Stillpoint integration tests.
//!
//! Provides mock adapters and harness infrastructure for fast, deterministic,
//! CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockProducer`] - Mock script producer with pre-configured outcomes
//! - [`TestHarness`] - Fully wired service stack over a temp database

pub mod harness;
pub mod mock_producer;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_producer::{MockProducer, ProducerOutcome, default_script};
