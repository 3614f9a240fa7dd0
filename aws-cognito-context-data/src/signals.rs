/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Device and environment signals reported alongside authentication requests.
//!
//! Signals are gathered by one or more [`CollectSignals`] implementations and merged by a
//! [`SignalAggregator`] into a flat [`SignalMap`].

use crate::error::{BoxError, ContextDataError};
use aws_types::os_shim_internal::Env;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Debug;
use std::sync::Arc;

/// Well-known signal names understood by Cognito advanced security.
pub mod keys {
    /// Name of the application reporting the signals.
    pub const APPLICATION_NAME: &str = "ApplicationName";
    /// Version of the application reporting the signals.
    pub const APPLICATION_VERSION: &str = "ApplicationVersion";
    /// SDK level the application targets.
    pub const APPLICATION_TARGET_SDK: &str = "ApplicationTargetSdk";
    /// Operating system of the device.
    pub const PLATFORM: &str = "Platform";
    /// Device brand.
    pub const DEVICE_BRAND: &str = "DeviceBrand";
    /// Device build fingerprint.
    pub const DEVICE_FINGERPRINT: &str = "DeviceFingerprint";
    /// Device hardware / CPU architecture.
    pub const DEVICE_HARDWARE: &str = "DeviceHardware";
    /// Device name.
    pub const DEVICE_NAME: &str = "DeviceName";
    /// Stable, application-scoped device identifier.
    pub const DEVICE_ID: &str = "DeviceId";
    /// Operating system release version.
    pub const DEVICE_OS_RELEASE_VERSION: &str = "DeviceOsReleaseVersion";
    /// Locale of the device.
    pub const DEVICE_LANGUAGE: &str = "DeviceLanguage";
    /// Timezone of the device.
    pub const CLIENT_TIMEZONE: &str = "ClientTimezone";
    /// Build type.
    pub const BUILD_TYPE: &str = "BuildType";
    /// Product name.
    pub const PRODUCT: &str = "Product";
    /// Screen height in pixels.
    pub const SCREEN_HEIGHT_PIXELS: &str = "ScreenHeightPixels";
    /// Screen width in pixels.
    pub const SCREEN_WIDTH_PIXELS: &str = "ScreenWidthPixels";
    /// Mobile network operator.
    pub const CARRIER: &str = "Carrier";
    /// Mobile network type.
    pub const NETWORK_TYPE: &str = "NetworkType";
    /// Whether a SIM card is present.
    pub const HAS_SIM_CARD: &str = "HasSimCard";
    /// Identifier of a third party device agent, if any.
    pub const THIRD_PARTY_DEVICE_AGENT: &str = "ThirdPartyDeviceAgent";
}

/// Flat mapping of signal name to signal value.
///
/// Iteration order is sorted by key so the serialized form of a map is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalMap(BTreeMap<String, String>);

impl SignalMap {
    /// Creates an empty signal map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a signal, returning the previous value for `key` if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the value of the signal named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of signals.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no signals.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over signals in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn retain_present(&mut self) {
        self.0.retain(|_, v| !v.is_empty());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SignalMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for SignalMap {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())))
    }
}

impl IntoIterator for SignalMap {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Source of device or environment signals.
///
/// Implementations are invoked once per encoding and must not rely on being called in any
/// particular order relative to other collectors.
pub trait CollectSignals: Debug + Send + Sync {
    /// Collects the signals this source knows about.
    fn collect(&self) -> Result<SignalMap, BoxError>;
}

/// Cheaply cloneable, type-erased [`CollectSignals`].
#[derive(Debug, Clone)]
pub struct SharedSignalCollector(Arc<dyn CollectSignals>);

impl SharedSignalCollector {
    /// Wraps a collector.
    pub fn new(collector: impl CollectSignals + 'static) -> Self {
        Self(Arc::new(collector))
    }
}

impl CollectSignals for SharedSignalCollector {
    fn collect(&self) -> Result<SignalMap, BoxError> {
        self.0.collect()
    }
}

/// Runs a list of collectors and merges what they report.
///
/// When two collectors report the same signal the one registered later wins. Signals with
/// an empty value are dropped.
#[derive(Debug, Clone, Default)]
pub struct SignalAggregator {
    collectors: Vec<SharedSignalCollector>,
}

impl SignalAggregator {
    /// Creates an aggregator with no collectors. It always produces an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a collector.
    pub fn with_collector(mut self, collector: impl CollectSignals + 'static) -> Self {
        self.push(SharedSignalCollector::new(collector));
        self
    }

    pub(crate) fn push(&mut self, collector: SharedSignalCollector) {
        self.collectors.push(collector);
    }

    /// Collects and merges signals from every registered collector.
    pub fn aggregate(&self) -> Result<SignalMap, ContextDataError> {
        let mut signals = SignalMap::new();
        for collector in &self.collectors {
            let collected = collector
                .collect()
                .map_err(ContextDataError::signal_collection)?;
            signals.extend(collected);
        }
        signals.retain_present();
        Ok(signals)
    }
}

/// A fixed set of signals.
#[derive(Debug, Clone, Default)]
pub struct StaticSignals(SignalMap);

impl StaticSignals {
    /// Creates a collector that always reports `signals`.
    pub fn new(signals: impl Into<SignalMap>) -> Self {
        Self(signals.into())
    }
}

impl CollectSignals for StaticSignals {
    fn collect(&self) -> Result<SignalMap, BoxError> {
        Ok(self.0.clone())
    }
}

/// Signals describing the calling application.
#[derive(Debug, Clone, Default)]
pub struct ApplicationSignals {
    name: Option<String>,
    version: Option<String>,
    target_sdk: Option<String>,
}

impl ApplicationSignals {
    /// Creates a new builder.
    pub fn builder() -> ApplicationSignalsBuilder {
        ApplicationSignalsBuilder::default()
    }
}

impl CollectSignals for ApplicationSignals {
    fn collect(&self) -> Result<SignalMap, BoxError> {
        let mut signals = SignalMap::new();
        let fields = [
            (keys::APPLICATION_NAME, &self.name),
            (keys::APPLICATION_VERSION, &self.version),
            (keys::APPLICATION_TARGET_SDK, &self.target_sdk),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                signals.insert(key, value.as_str());
            }
        }
        Ok(signals)
    }
}

/// Builder for [`ApplicationSignals`].
#[derive(Debug, Default)]
pub struct ApplicationSignalsBuilder {
    inner: ApplicationSignals,
}

impl ApplicationSignalsBuilder {
    /// Sets the application name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.name = Some(name.into());
        self
    }

    /// Sets the application version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.inner.version = Some(version.into());
        self
    }

    /// Sets the SDK level the application targets.
    pub fn target_sdk(mut self, target_sdk: impl Into<String>) -> Self {
        self.inner.target_sdk = Some(target_sdk.into());
        self
    }

    /// Builds the collector.
    pub fn build(self) -> ApplicationSignals {
        self.inner
    }
}

/// Signals derived from the host the process runs on.
///
/// Reports the target operating system and architecture, and reads the locale (`LANG`),
/// timezone (`TZ`) and host name (`HOSTNAME`) from the environment. Variables that are not
/// set are omitted.
#[derive(Clone, Default)]
pub struct HostSignals {
    env: Env,
}

impl fmt::Debug for HostSignals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostSignals").finish_non_exhaustive()
    }
}

impl HostSignals {
    /// Creates a collector reading from the process environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collector reading from the given environment.
    pub fn from_env(env: Env) -> Self {
        Self { env }
    }

    fn var(&self, key: &str) -> Option<String> {
        self.env.get(key).ok().filter(|v| !v.is_empty())
    }
}

impl CollectSignals for HostSignals {
    fn collect(&self) -> Result<SignalMap, BoxError> {
        let mut signals = SignalMap::new();
        signals.insert(keys::PLATFORM, std::env::consts::OS);
        signals.insert(keys::DEVICE_HARDWARE, std::env::consts::ARCH);
        if let Some(lang) = self.var("LANG") {
            // en_US.UTF-8@euro -> en_US
            let locale = lang.split(['.', '@']).next().unwrap_or_default();
            signals.insert(keys::DEVICE_LANGUAGE, locale);
        }
        if let Some(tz) = self.var("TZ") {
            signals.insert(keys::CLIENT_TIMEZONE, tz.trim_start_matches(':'));
        }
        if let Some(host) = self.var("HOSTNAME") {
            signals.insert(keys::DEVICE_NAME, host);
        }
        Ok(signals)
    }
}

impl From<BTreeMap<String, String>> for SignalMap {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for SignalMap {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs.into_iter().collect()
    }
}
