/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

/// Boxed error returned by signal collectors.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// The stage of context data encoding that failed.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A signal collector failed to produce device or environment signals.
    SignalCollection,
    /// The clock returned a time that can't be expressed as epoch milliseconds.
    Timestamp,
    /// The signing secret was empty.
    MissingSecret,
    /// The MAC could not be computed.
    ///
    /// HMAC-SHA256 accepts keys of any length, so this is not produced by the built-in signer.
    Signing,
    /// An encoded envelope could not be decoded.
    InvalidEnvelope,
    /// An input required to compute a value was empty.
    InvalidInput,
}

/// Error type for context data and secret hash operations
#[derive(Debug)]
pub struct ContextDataError {
    kind: ErrorKind,
    source: Option<BoxError>,
    message: Option<Cow<'static, str>>,
}

impl ContextDataError {
    pub(crate) fn new(
        kind: ErrorKind,
        source: Option<BoxError>,
        message: Option<Cow<'static, str>>,
    ) -> Self {
        Self {
            kind,
            source,
            message,
        }
    }

    pub(crate) fn signal_collection(source: impl Into<BoxError>) -> Self {
        Self::new(ErrorKind::SignalCollection, Some(source.into()), None)
    }

    pub(crate) fn timestamp(source: impl Into<BoxError>) -> Self {
        Self::new(ErrorKind::Timestamp, Some(source.into()), None)
    }

    pub(crate) fn missing_secret(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::MissingSecret, None, Some(message.into()))
    }

    pub(crate) fn signing(source: impl Into<BoxError>) -> Self {
        Self::new(ErrorKind::Signing, Some(source.into()), None)
    }

    pub(crate) fn invalid_envelope(
        message: impl Into<Cow<'static, str>>,
        source: Option<BoxError>,
    ) -> Self {
        Self::new(ErrorKind::InvalidEnvelope, source, Some(message.into()))
    }

    pub(crate) fn invalid_input(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidInput, None, Some(message.into()))
    }

    /// Returns the kind of failure.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for ContextDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::SignalCollection => write!(f, "failed to collect context signals")?,
            ErrorKind::Timestamp => write!(f, "current time is not representable")?,
            ErrorKind::MissingSecret => write!(f, "missing signing secret")?,
            ErrorKind::Signing => write!(f, "signing operation failed")?,
            ErrorKind::InvalidEnvelope => write!(f, "invalid context data envelope")?,
            ErrorKind::InvalidInput => write!(f, "invalid input")?,
        }
        if let Some(ref msg) = self.message {
            write!(f, ": {msg}")?;
        }
        Ok(())
    }
}

impl StdError for ContextDataError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as _)
    }
}

impl From<ErrorKind> for ContextDataError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind, None, None)
    }
}
