//! Delete Secret Value Object
//!
//! The single shared value that authorizes deletions. Only a SHA-256 digest
//! of the configured secret is kept, and candidates are compared digest to
//! digest so the comparison does not depend on where the inputs differ.

use std::fmt;

use sha2::{Digest, Sha256};

#[derive(Clone)]
pub struct DeleteSecret {
    digest: Option<[u8; 32]>,
}

impl DeleteSecret {
    /// An empty secret disables deletion: nothing will verify against it.
    pub fn new(secret: &str) -> Self {
        if secret.is_empty() {
            return Self::disabled();
        }
        Self {
            digest: Some(Sha256::digest(secret.as_bytes()).into()),
        }
    }

    pub fn disabled() -> Self {
        Self { digest: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.digest.is_some()
    }

    pub fn verify(&self, candidate: &str) -> bool {
        let Some(expected) = &self.digest else {
            return false;
        };
        let actual: [u8; 32] = Sha256::digest(candidate.as_bytes()).into();
        expected
            .iter()
            .zip(actual.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl fmt::Debug for DeleteSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeleteSecret")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_secret_verifies() {
        let secret = DeleteSecret::new("s3cret");
        assert!(secret.verify("s3cret"));
        assert!(!secret.verify("s3cret "));
        assert!(!secret.verify(""));
    }

    #[test]
    fn empty_secret_rejects_everything() {
        let secret = DeleteSecret::new("");
        assert!(!secret.is_enabled());
        assert!(!secret.verify(""));
        assert!(!secret.verify("anything"));
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let rendered = format!("{:?}", DeleteSecret::new("s3cret"));
        assert!(!rendered.contains("s3cret"));
    }
}
