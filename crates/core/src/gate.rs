//! Shared-secret gate in front of the deletion panel.
//!
//! A single configured secret guards every destructive operation. The
//! comparison runs over SHA-256 digests so the check is length-independent
//! and lives in exactly one place. An unconfigured (empty) secret denies
//! everything: the panel fails closed rather than open.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

use crate::errors::GateError;

#[derive(Clone)]
pub struct AdminGate {
    secret: SecretString,
}

impl AdminGate {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    pub fn verify(&self, submitted: &str) -> Result<(), GateError> {
        let expected = self.secret.expose_secret();
        if expected.is_empty() {
            return Err(GateError::AccessDenied);
        }

        let expected_digest = Sha256::digest(expected.as_bytes());
        let submitted_digest = Sha256::digest(submitted.as_bytes());
        if expected_digest == submitted_digest {
            Ok(())
        } else {
            Err(GateError::AccessDenied)
        }
    }
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate").finish_non_exhaustive()
    }
}
