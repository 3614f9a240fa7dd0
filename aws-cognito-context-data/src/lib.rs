/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/* Automatically managed default lints */
#![cfg_attr(docsrs, feature(doc_cfg))]
/* End of automatically managed default lints */
//! User context data and secret hash helpers for Amazon Cognito user pools.
//!
//! Cognito advanced security accepts an `EncodedData` blob describing the device a request
//! comes from. The blob is produced by:
//!
//! 1. collecting device and environment [signals](signals),
//! 2. wrapping them with the username, user pool ID and a timestamp into a [`Payload`],
//! 3. [signing](sign::sign) the serialized payload,
//! 4. placing payload, signature and [`PROTOCOL_VERSION`] into an [`Envelope`] and base64
//!    encoding it.
//!
//! [`ContextDataProvider`] runs all of these steps.

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

mod envelope;
/// Error types for context data operations.
pub mod error;
mod json;
mod payload;
mod provider;
mod secret_hash;
/// Context data signing.
pub mod sign;
pub mod signals;
mod user_context;

pub use envelope::{EncodedContextData, Envelope};
pub use payload::Payload;
pub use provider::{Builder as ContextDataProviderBuilder, ContextDataProvider};
pub use secret_hash::secret_hash;
pub use sign::PROTOCOL_VERSION;
pub use user_context::{UserContextData, UserContextDataBuilder};
