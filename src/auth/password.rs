use crate::error::AppError;
use bcrypt::{hash, verify};

// bcrypt's modular-crypt digest ($2b$cost$salt+hash) embeds the algorithm id
// and per-call random salt, so digests from a future algorithm can coexist.

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, 12)
        .map_err(|e| AppError::Internal(format!("failed to hash password: {}", e)))
}

/// Constant-time comparison against the salt embedded in `digest`. A wrong
/// password is `Ok(false)`, never an error.
pub fn verify_password(password: &str, digest: &str) -> Result<bool, AppError> {
    verify(password, digest)
        .map_err(|e| AppError::Internal(format!("failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing_and_verification() {
        let password = "test_password123";
        let digest = hash_password(password).unwrap();

        assert!(verify_password(password, &digest).unwrap());
        assert!(!verify_password("wrong_password", &digest).unwrap());
    }

    #[test]
    fn test_hashing_is_salted() {
        let password = "same_input";
        let first = hash_password(password).unwrap();
        let second = hash_password(password).unwrap();
        assert_ne!(first, second);
        assert!(verify_password(password, &first).unwrap());
        assert!(verify_password(password, &second).unwrap());
    }

    #[test]
    fn test_verify_with_invalid_digest() {
        match verify_password("test_password123", "invalidhashformat") {
            Err(AppError::Internal(msg)) => {
                assert!(msg.contains("failed to verify password"));
            }
            Ok(false) => {
                // bcrypt may also report a malformed digest as a plain
                // verification failure.
            }
            Ok(true) => panic!("verification must fail for an invalid digest"),
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }
}
