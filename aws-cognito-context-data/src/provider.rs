/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::envelope::{EncodedContextData, Envelope};
use crate::error::ContextDataError;
use crate::payload::Payload;
use crate::sign::{self, PROTOCOL_VERSION};
use crate::signals::{CollectSignals, SharedSignalCollector, SignalAggregator};
use crate::user_context::UserContextData;
use aws_smithy_async::time::{SharedTimeSource, TimeSource};
use aws_smithy_types::error::display::DisplayErrorContext;
use std::borrow::Cow;

/// Produces signed, encoded user context data for Cognito advanced security.
///
/// A provider holds no mutable state. Clone it freely and share it across threads; every call
/// collects signals, reads the clock once and signs independently.
///
/// # Examples
///
/// ```
/// use aws_cognito_context_data::signals::StaticSignals;
/// use aws_cognito_context_data::ContextDataProvider;
///
/// let provider = ContextDataProvider::builder()
///     .signal_collector(StaticSignals::new([("Platform", "linux")]))
///     .build();
/// let encoded = provider
///     .encode("alice", "us-east-1_ABC123", "app-client-id")
///     .expect("non-empty secret");
/// assert!(!encoded.as_str().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ContextDataProvider {
    aggregator: SignalAggregator,
    time_source: SharedTimeSource,
    version: Cow<'static, str>,
}

impl ContextDataProvider {
    /// Creates a new builder.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Protocol version tag this provider signs with.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Collects signals and returns them signed and encoded for `username` in `user_pool_id`.
    ///
    /// `secret` is the signing key; Cognito expects the app client ID.
    pub fn encode(
        &self,
        username: &str,
        user_pool_id: &str,
        secret: &str,
    ) -> Result<EncodedContextData, ContextDataError> {
        let signals = self.aggregator.aggregate()?;
        let signal_count = signals.len();
        let payload = Payload::new(signals, username, user_pool_id, self.time_source.now())?;

        // the exact string that is signed is the one placed in the envelope
        let payload = payload.to_json();
        let signature = sign::sign(&payload, secret, &self.version)?;
        let encoded = Envelope::with_version(payload, signature, self.version.as_ref()).encode();

        tracing::debug!(
            signals = signal_count,
            version = %self.version,
            "encoded user context data"
        );
        Ok(encoded)
    }

    /// Like [`encode`](Self::encode), but reports failures as `None`.
    ///
    /// Context data is optional for authentication, so callers that must not be interrupted
    /// by a failure to produce it can use this and omit the data. Failures are logged.
    pub fn encode_or_none(
        &self,
        username: &str,
        user_pool_id: &str,
        secret: &str,
    ) -> Option<EncodedContextData> {
        match self.encode(username, user_pool_id, secret) {
            Ok(encoded) => Some(encoded),
            Err(err) => {
                tracing::warn!(
                    err = %DisplayErrorContext(&err),
                    "user context data unavailable"
                );
                None
            }
        }
    }

    /// Builds the `UserContextData` request member.
    ///
    /// If context data can't be produced the returned value has no encoded data.
    pub fn user_context_data(
        &self,
        username: &str,
        user_pool_id: &str,
        secret: &str,
        ip_address: Option<String>,
    ) -> UserContextData {
        UserContextData::builder()
            .set_encoded_data(self.encode_or_none(username, user_pool_id, secret))
            .set_ip_address(ip_address)
            .build()
    }
}

/// Builder for [`ContextDataProvider`].
#[derive(Debug, Default)]
pub struct Builder {
    aggregator: SignalAggregator,
    time_source: Option<SharedTimeSource>,
    version: Option<Cow<'static, str>>,
}

impl Builder {
    /// Adds a signal collector.
    ///
    /// Collectors run in the order they were added; later collectors override signals reported
    /// by earlier ones. Without any collectors the payload carries an empty signal map.
    pub fn signal_collector(mut self, collector: impl CollectSignals + 'static) -> Self {
        self.aggregator.push(SharedSignalCollector::new(collector));
        self
    }

    /// Replaces all collectors with `aggregator`.
    pub fn aggregator(mut self, aggregator: SignalAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Sets the clock used to timestamp payloads. Defaults to the system clock.
    pub fn time_source(mut self, time_source: impl TimeSource + 'static) -> Self {
        self.time_source = Some(SharedTimeSource::new(time_source));
        self
    }

    /// Overrides the protocol version tag. Defaults to [`PROTOCOL_VERSION`].
    pub fn version(mut self, version: impl Into<Cow<'static, str>>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Builds the provider.
    pub fn build(self) -> ContextDataProvider {
        ContextDataProvider {
            aggregator: self.aggregator,
            time_source: self.time_source.unwrap_or_default(),
            version: self.version.unwrap_or(Cow::Borrowed(PROTOCOL_VERSION)),
        }
    }
}
