//! Access gate for the dashboard
//!
//! Provides:
//! - Shared access code hashing
//! - Access code checks with a paced verification step
//!
//! There are no accounts: a granted attempt flips the dashboard's
//! authenticated flag until logout.

use crate::config::AuthConfig;
use crate::errors::{AppError, Result};
use crate::metrics;
use sha2::{Digest, Sha256};
use std::time::Duration;

/// Hash an access code for storage/comparison
pub fn hash_access_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    hex::encode(hasher.finalize())
}

/// Gate guarding the dashboard behind one shared access code
#[derive(Debug, Clone)]
pub struct AccessGate {
    code_hash: String,
    verify_delay: Duration,
}

impl AccessGate {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            code_hash: hash_access_code(&config.access_code),
            verify_delay: config.verify_delay(),
        }
    }

    /// Check an attempt without waiting
    pub fn check(&self, attempt: &str) -> Result<()> {
        if attempt.is_empty() {
            return Err(AppError::missing("access_code"));
        }

        if hash_access_code(attempt) != self.code_hash {
            return Err(AppError::InvalidAccessCode);
        }

        Ok(())
    }

    /// Verify an attempt after the configured delay
    pub async fn verify(&self, attempt: &str) -> Result<()> {
        if !self.verify_delay.is_zero() {
            tokio::time::sleep(self.verify_delay).await;
        }

        let outcome = self.check(attempt);
        let granted = outcome.is_ok();
        metrics::record_access_attempt(granted);

        if granted {
            tracing::info!("Access granted");
        } else {
            tracing::warn!("Access denied");
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AccessGate {
        AccessGate::new(&AuthConfig {
            verify_delay_ms: 0,
            ..AuthConfig::default()
        })
    }

    #[test]
    fn test_hash_access_code() {
        let hash = hash_access_code("55555");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_access_code("55555"));
        assert_ne!(hash, hash_access_code("55556"));
    }

    #[test]
    fn test_default_code_is_accepted() {
        assert!(gate().check("55555").is_ok());
    }

    #[test]
    fn test_wrong_and_empty_codes() {
        let gate = gate();
        assert!(matches!(gate.check("12345"), Err(AppError::InvalidAccessCode)));
        assert!(matches!(gate.check(" 55555"), Err(AppError::InvalidAccessCode)));
        assert!(matches!(
            gate.check(""),
            Err(AppError::MissingField { ref field }) if field == "access_code"
        ));
    }

    #[test]
    fn test_configured_code_replaces_default() {
        let gate = AccessGate::new(&AuthConfig {
            access_code: "open-sesame".to_string(),
            verify_delay_ms: 0,
        });
        assert!(gate.check("open-sesame").is_ok());
        assert!(gate.check("55555").is_err());
    }

    #[test]
    fn test_verify_blocking() {
        let gate = gate();
        assert!(tokio_test::block_on(gate.verify("55555")).is_ok());
    }

    #[tokio::test]
    async fn test_verify_without_delay() {
        let gate = gate();
        assert!(gate.verify("55555").await.is_ok());
        assert!(gate.verify("nope").await.is_err());
    }
}
