/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::ContextDataError;
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Computes the `SECRET_HASH` parameter required by app clients that have a client secret.
///
/// SecretHash = Base64(HMAC-SHA256(key = client_secret, message = username ‖ client_id))
pub fn secret_hash(
    username: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<String, ContextDataError> {
    if username.is_empty() {
        return Err(ContextDataError::invalid_input(
            "username must not be empty",
        ));
    }
    if client_id.is_empty() {
        return Err(ContextDataError::invalid_input(
            "client ID must not be empty",
        ));
    }
    if client_secret.is_empty() {
        return Err(ContextDataError::missing_secret(
            "a client secret is required to compute a secret hash",
        ));
    }

    // any key length is accepted by HMAC
    let mut mac = Hmac::<Sha256>::new_from_slice(client_secret.as_bytes())
        .map_err(|_| ContextDataError::signing("HMAC-SHA256 rejected the client secret"))?;
    mac.update(username.as_bytes());
    mac.update(client_id.as_bytes());
    Ok(base64_simd::STANDARD.encode_to_string(&mac.finalize().into_bytes()[..]))
}
