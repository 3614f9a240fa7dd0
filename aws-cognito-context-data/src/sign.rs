/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::ContextDataError;
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Protocol version tag bound into every context data signature.
pub const PROTOCOL_VERSION: &str = "ANDROID20171114";

fn mac(secret: &str, version: &str) -> Result<Hmac<Sha256>, ContextDataError> {
    if secret.is_empty() {
        return Err(ContextDataError::missing_secret(
            "a non-empty secret is required to sign context data",
        ));
    }
    // HMAC accepts keys of any length, so this never fails in practice
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .map_err(|_| ContextDataError::signing("HMAC-SHA256 rejected the signing key"))?;
    mac.update(version.as_bytes());
    Ok(mac)
}

/// Signs a serialized payload.
///
/// Signature = Base64(HMAC-SHA256(key = secret, message = version ‖ payload))
///
/// The secret is conventionally the app client ID of the user pool.
pub fn sign(payload: &str, secret: &str, version: &str) -> Result<String, ContextDataError> {
    let mut mac = mac(secret, version)?;
    mac.update(payload.as_bytes());
    let tag = mac.finalize().into_bytes();
    Ok(base64_simd::STANDARD.encode_to_string(&tag[..]))
}

/// Checks `signature` against a payload, comparing MACs in constant time.
///
/// Returns `false` for a signature that is not valid base64 or was produced with a
/// different secret, version or payload.
pub fn verify(
    payload: &str,
    secret: &str,
    version: &str,
    signature: &str,
) -> Result<bool, ContextDataError> {
    let mut mac = mac(secret, version)?;
    mac.update(payload.as_bytes());
    let Ok(expected) = base64_simd::STANDARD.decode_to_vec(signature) else {
        return Ok(false);
    };
    Ok(mac.verify_slice(&expected).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_signature_is_padded_base64_of_sha256_mac() {
        let signature = sign("abc", "k1", PROTOCOL_VERSION).unwrap();
        assert_eq!(signature.len(), 44);
        assert!(signature.ends_with('='));
        assert_eq!(
            base64_simd::STANDARD
                .decode_to_vec(&signature)
                .unwrap()
                .len(),
            32
        );
    }

    #[test]
    fn test_known_answer() {
        // HMAC-SHA256(key = "key", "The quick brown fox jumps over the lazy dog")
        let signature = sign("quick brown fox jumps over the lazy dog", "key", "The ").unwrap();
        assert_eq!(signature, "97yD9DBThCSxMpjmqm+xQ+9NWaFJRhdZl0edvC0aPNg=");
    }

    #[test]
    fn test_secret_changes_signature() {
        assert_ne!(
            sign("abc", "k1", PROTOCOL_VERSION).unwrap(),
            sign("abc", "k2", PROTOCOL_VERSION).unwrap()
        );
    }

    #[test]
    fn test_version_changes_signature() {
        assert_ne!(
            sign("abc", "k1", PROTOCOL_VERSION).unwrap(),
            sign("abc", "k1", "ANDROID20200101").unwrap()
        );
    }

    #[test]
    fn test_payload_changes_signature() {
        assert_ne!(
            sign("abc", "k1", PROTOCOL_VERSION).unwrap(),
            sign("abd", "k1", PROTOCOL_VERSION).unwrap()
        );
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        let err = sign("abc", "", PROTOCOL_VERSION).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingSecret);
    }

    #[test]
    fn test_verify() {
        let signature = sign("abc", "k1", PROTOCOL_VERSION).unwrap();
        assert!(verify("abc", "k1", PROTOCOL_VERSION, &signature).unwrap());
        assert!(!verify("abc", "k2", PROTOCOL_VERSION, &signature).unwrap());
        assert!(!verify("abc", "k1", "other", &signature).unwrap());
        assert!(!verify("abc", "k1", PROTOCOL_VERSION, "not base64!").unwrap());
        assert_eq!(
            verify("abc", "", PROTOCOL_VERSION, &signature)
                .unwrap_err()
                .kind(),
            ErrorKind::MissingSecret
        );
    }
}
