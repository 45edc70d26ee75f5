// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock script producer for deterministic testing.
//!
//! `MockProducer` implements `ScriptProducer` with pre-configured outcomes,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use stillpoint_core::{Assessment, MeditationScript, ScriptProducer, StillpointError};

/// One scripted producer outcome.
#[derive(Debug, Clone)]
pub enum ProducerOutcome {
    /// Return this script.
    Script(MeditationScript),
    /// Fail with a producer error carrying this message.
    Failure(String),
}

/// A mock producer that pops outcomes from a FIFO queue.
///
/// When the queue is empty, a default script is returned. Calls are counted
/// so tests can assert the producer was (or was not) reached.
pub struct MockProducer {
    outcomes: Mutex<VecDeque<ProducerOutcome>>,
    calls: AtomicUsize,
}

impl MockProducer {
    /// Create a mock producer with an empty outcome queue.
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock producer pre-loaded with the given outcomes.
    pub fn with_outcomes(outcomes: Vec<ProducerOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::from(outcomes)),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock producer that fails every call. A lone failure outcome
    /// repeats, so this holds for any number of calls.
    pub fn always_failing() -> Self {
        Self::with_outcomes(vec![ProducerOutcome::Failure("mock producer down".into())])
    }

    /// Queue an outcome.
    pub fn push_outcome(&self, outcome: ProducerOutcome) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    /// Number of `generate` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_outcome(&self) -> ProducerOutcome {
        let mut outcomes = self.outcomes.lock().unwrap();
        match outcomes.pop_front() {
            Some(outcome) => {
                // A lone failure outcome repeats so `always_failing` holds
                // for any number of calls.
                if outcomes.is_empty()
                    && matches!(outcome, ProducerOutcome::Failure(_))
                {
                    outcomes.push_back(outcome.clone());
                }
                outcome
            }
            None => ProducerOutcome::Script(default_script()),
        }
    }
}

impl Default for MockProducer {
    fn default() -> Self {
        Self::new()
    }
}

/// The script returned when the outcome queue is empty.
pub fn default_script() -> MeditationScript {
    MeditationScript::from_sections(
        "Welcome to this practice.".into(),
        "Let each breath settle you a little deeper.".into(),
        "Carry this calm with you.".into(),
        10,
    )
}

#[async_trait]
impl ScriptProducer for MockProducer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        assessment: &Assessment,
        _primer: &str,
    ) -> Result<MeditationScript, StillpointError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.next_outcome() {
            ProducerOutcome::Script(mut script) => {
                script.estimated_duration = assessment.duration;
                Ok(script)
            }
            ProducerOutcome::Failure(message) => Err(StillpointError::Producer {
                message,
                source: None,
            }),
        }
    }
}
