use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("stored password hash is malformed: {0}")]
    MalformedHash(password_hash::Error),
    #[error("password hashing failed: {0}")]
    Hash(password_hash::Error),
}

/// Argon2id hasher. `cost` is the iteration count; memory and lanes stay at
/// the argon2 defaults.
#[derive(Clone)]
pub struct Hasher {
    params: Params,
}

impl Hasher {
    pub fn new(cost: u32) -> anyhow::Result<Self> {
        let params = Params::new(Params::DEFAULT_M_COST, cost, Params::DEFAULT_P_COST, None)
            .map_err(|e| anyhow::anyhow!("invalid password hash cost {cost}: {e}"))?;
        Ok(Self { params })
    }

    pub fn hash(&self, plain: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());
        let hash = argon2
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| {
                error!(error = %e, "argon2 hash_password error");
                PasswordError::Hash(e)
            })?
            .to_string();
        Ok(hash)
    }

    /// Parameters and salt are taken from `hash` itself, so hashes made with an
    /// older cost still verify.
    pub fn verify(&self, plain: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(hash).map_err(PasswordError::MalformedHash)?;
        match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::MalformedHash(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> Hasher {
        Hasher::new(1).expect("cost 1 is valid")
    }

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hasher().hash(password).expect("hashing should succeed");
        assert!(hasher().verify(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn hashes_are_salted() {
        let h = hasher();
        let a = h.hash("password123").unwrap();
        let b = h.hash("password123").unwrap();
        assert_ne!(a, b);
        assert!(h.verify("password123", &a).unwrap());
        assert!(h.verify("password123", &b).unwrap());
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hash = hasher().hash(password).expect("hashing should succeed");
        assert!(!hasher()
            .verify("wrong-password", &hash)
            .expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = hasher().verify("anything", "not-a-valid-hash").unwrap_err();
        assert!(matches!(err, PasswordError::MalformedHash(_)));
    }

    #[test]
    fn cost_is_embedded_in_hash() {
        let hash = Hasher::new(3).unwrap().hash("password123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("t=3"));
        assert!(hasher().verify("password123", &hash).unwrap());
    }

    #[test]
    fn zero_cost_is_rejected() {
        assert!(Hasher::new(0).is_err());
    }
}
