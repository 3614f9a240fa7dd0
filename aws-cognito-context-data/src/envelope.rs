/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::ContextDataError;
use crate::json::{expect_string, parse_object};
use crate::payload::Payload;
use crate::sign::{self, PROTOCOL_VERSION};
use aws_smithy_json::serialize::JsonObjectWriter;
use std::fmt;

const PAYLOAD: &str = "payload";
const SIGNATURE: &str = "signature";
const VERSION: &str = "version";

/// A signed payload, ready to be encoded for transport.
///
/// The payload is carried as its serialized JSON string rather than a nested object, so the
/// receiver can verify the signature over the exact bytes that were signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    payload: String,
    signature: String,
    version: String,
}

impl Envelope {
    /// Creates an envelope tagged with [`PROTOCOL_VERSION`].
    pub fn new(payload: impl Into<String>, signature: impl Into<String>) -> Self {
        Self::with_version(payload, signature, PROTOCOL_VERSION)
    }

    /// Creates an envelope tagged with `version`.
    pub fn with_version(
        payload: impl Into<String>,
        signature: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            payload: payload.into(),
            signature: signature.into(),
            version: version.into(),
        }
    }

    /// The serialized payload.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Base64 signature over [`Envelope::payload`].
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Protocol version tag.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Parses the embedded payload.
    pub fn parse_payload(&self) -> Result<Payload, ContextDataError> {
        Payload::from_json(&self.payload)
    }

    /// Checks the signature against the embedded payload and version.
    pub fn verify(&self, secret: &str) -> Result<bool, ContextDataError> {
        sign::verify(&self.payload, secret, &self.version, &self.signature)
    }

    /// Serializes the envelope to JSON.
    pub fn to_json(&self) -> String {
        let mut out = String::new();
        let mut root = JsonObjectWriter::new(&mut out);
        root.key(PAYLOAD).string(&self.payload);
        root.key(SIGNATURE).string(&self.signature);
        root.key(VERSION).string(&self.version);
        root.finish();
        out
    }

    /// Serializes the envelope and base64 encodes it (standard alphabet, padded).
    pub fn encode(&self) -> EncodedContextData {
        EncodedContextData(base64_simd::STANDARD.encode_to_string(self.to_json()))
    }

    /// Reverses [`Envelope::encode`].
    pub fn decode(encoded: &str) -> Result<Self, ContextDataError> {
        let bytes = base64_simd::STANDARD
            .decode_to_vec(encoded.trim())
            .map_err(|err| ContextDataError::invalid_envelope("not base64", Some(err.into())))?;

        let mut payload = None;
        let mut signature = None;
        let mut version = None;
        parse_object(&bytes, |key, tokens| {
            match key {
                PAYLOAD => payload = Some(expect_string(tokens.next())?),
                SIGNATURE => signature = Some(expect_string(tokens.next())?),
                VERSION => version = Some(expect_string(tokens.next())?),
                _ => aws_smithy_json::deserialize::token::skip_value(tokens)?,
            }
            Ok(())
        })
        .map_err(|err| ContextDataError::invalid_envelope("malformed JSON", Some(err.into())))?;

        let require = |value: Option<String>, key: &'static str| {
            value.ok_or_else(|| {
                ContextDataError::invalid_envelope(format!("envelope is missing `{key}`"), None)
            })
        };
        Ok(Self {
            payload: require(payload, PAYLOAD)?,
            signature: require(signature, SIGNATURE)?,
            version: require(version, VERSION)?,
        })
    }
}

/// Base64 encoded, signed context data as sent in the `EncodedData` member of
/// `UserContextDataType`.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedContextData(String);

impl EncodedContextData {
    /// Returns the encoded string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes back into an [`Envelope`].
    pub fn decode(&self) -> Result<Envelope, ContextDataError> {
        Envelope::decode(&self.0)
    }

    /// Consumes this value, returning the encoded string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for EncodedContextData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EncodedContextData")
            .field(&format_args!("{} bytes", self.0.len()))
            .finish()
    }
}

impl fmt::Display for EncodedContextData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EncodedContextData {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<EncodedContextData> for String {
    fn from(value: EncodedContextData) -> Self {
        value.0
    }
}
