/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::envelope::EncodedContextData;

/// Contextual data about the user's session, as sent in the `UserContextData` member of
/// Cognito user pool authentication requests.
#[non_exhaustive]
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct UserContextData {
    /// Source IP address of the user's device.
    pub ip_address: Option<String>,
    /// Encoded device fingerprint details.
    pub encoded_data: Option<String>,
}

impl UserContextData {
    /// Source IP address of the user's device.
    pub fn ip_address(&self) -> Option<&str> {
        self.ip_address.as_deref()
    }

    /// Encoded device fingerprint details.
    pub fn encoded_data(&self) -> Option<&str> {
        self.encoded_data.as_deref()
    }

    /// Creates a new builder.
    pub fn builder() -> UserContextDataBuilder {
        UserContextDataBuilder::default()
    }
}

/// Builder for [`UserContextData`].
#[non_exhaustive]
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct UserContextDataBuilder {
    pub(crate) ip_address: Option<String>,
    pub(crate) encoded_data: Option<String>,
}

impl UserContextDataBuilder {
    /// Source IP address of the user's device.
    pub fn ip_address(mut self, input: impl Into<String>) -> Self {
        self.ip_address = Some(input.into());
        self
    }

    /// Source IP address of the user's device.
    pub fn set_ip_address(mut self, input: Option<String>) -> Self {
        self.ip_address = input;
        self
    }

    /// Encoded device fingerprint details.
    pub fn encoded_data(mut self, input: EncodedContextData) -> Self {
        self.encoded_data = Some(input.into_inner());
        self
    }

    /// Encoded device fingerprint details.
    pub fn set_encoded_data(mut self, input: Option<EncodedContextData>) -> Self {
        self.encoded_data = input.map(EncodedContextData::into_inner);
        self
    }

    /// Consumes the builder and constructs a [`UserContextData`].
    pub fn build(self) -> UserContextData {
        UserContextData {
            ip_address: self.ip_address,
            encoded_data: self.encoded_data,
        }
    }
}
