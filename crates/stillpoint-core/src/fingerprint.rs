// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content fingerprinting for script-cache keys.
//!
//! The fingerprint is derived from exactly the five semantically relevant
//! request fields, serialized in a canonical (declaration) order before
//! hashing, so field values rather than incidental formatting determine
//! equality. Two requests agreeing on these fields produce the same key no
//! matter what else they carry (environment, time of day, ...).

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::types::Assessment;

/// Hex length of a fingerprint: 128 bits of a SHA-256 digest.
///
/// A collision would surface as a harmless cache hit; cached content is
/// re-derivable and not security-sensitive.
const FINGERPRINT_HEX_LEN: usize = 32;

/// The canonical key material. Field order is the wire order; do not reorder.
#[derive(Serialize)]
struct KeyFields<'a> {
    goal: &'a str,
    current_state: &'a str,
    duration: u32,
    experience: &'a str,
    primer: &'a str,
}

/// Compute the cache fingerprint for an assessment and optional primer.
///
/// Pure function: no I/O, no side effects. An absent primer is treated as
/// the empty string, so "no primer" and `primer: ""` share a key.
pub fn fingerprint(assessment: &Assessment, primer: &str) -> String {
    let fields = KeyFields {
        goal: &assessment.goal,
        current_state: &assessment.current_state,
        duration: assessment.duration,
        experience: &assessment.experience,
        primer,
    };
    // Struct serialization emits fields in declaration order, giving a
    // canonical byte sequence without a separate canonicalization step.
    let canonical =
        serde_json::to_string(&fields).expect("key fields contain no non-serializable data");
    let digest = Sha256::digest(canonical.as_bytes());
    let mut hexdigest = hex::encode(digest);
    hexdigest.truncate(FINGERPRINT_HEX_LEN);
    hexdigest
}
