/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::ContextDataError;
use crate::json::{expect_string, expect_string_map, parse_object};
use crate::signals::SignalMap;
use aws_smithy_json::serialize::JsonObjectWriter;
use aws_smithy_types::DateTime;
use std::time::SystemTime;

const CONTEXT_DATA: &str = "contextData";
const USERNAME: &str = "username";
const USER_POOL_ID: &str = "userPoolId";
const TIMESTAMP: &str = "timestamp";

/// The record that gets signed: collected signals plus the identity they were collected for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    context_data: SignalMap,
    username: String,
    user_pool_id: String,
    timestamp: String,
}

impl Payload {
    /// Builds a payload stamped with `now` in epoch milliseconds.
    ///
    /// The username and user pool ID are passed through as given.
    pub fn new(
        context_data: SignalMap,
        username: impl Into<String>,
        user_pool_id: impl Into<String>,
        now: SystemTime,
    ) -> Result<Self, ContextDataError> {
        let millis = DateTime::from(now)
            .to_millis()
            .map_err(ContextDataError::timestamp)?;
        Ok(Self {
            context_data,
            username: username.into(),
            user_pool_id: user_pool_id.into(),
            timestamp: millis.to_string(),
        })
    }

    /// Collected signals.
    pub fn context_data(&self) -> &SignalMap {
        &self.context_data
    }

    /// Username the signals were collected for.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// User pool ID the signals were collected for.
    pub fn user_pool_id(&self) -> &str {
        &self.user_pool_id
    }

    /// Epoch milliseconds, as a decimal string.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Serializes the payload.
    ///
    /// Keys are always written in the same order, so the output for a given payload is stable.
    pub fn to_json(&self) -> String {
        let mut out = String::new();
        let mut root = JsonObjectWriter::new(&mut out);

        let mut context_data = root.key(CONTEXT_DATA).start_object();
        for (name, value) in self.context_data.iter() {
            context_data.key(name).string(value);
        }
        context_data.finish();

        root.key(USERNAME).string(&self.username);
        root.key(USER_POOL_ID).string(&self.user_pool_id);
        root.key(TIMESTAMP).string(&self.timestamp);
        root.finish();

        out
    }

    /// Parses a payload previously produced by [`Payload::to_json`].
    pub fn from_json(json: &str) -> Result<Self, ContextDataError> {
        let mut context_data = None;
        let mut username = None;
        let mut user_pool_id = None;
        let mut timestamp = None;

        parse_object(json.as_bytes(), |key, tokens| {
            match key {
                CONTEXT_DATA => context_data = Some(expect_string_map(tokens)?),
                USERNAME => username = Some(expect_string(tokens.next())?),
                USER_POOL_ID => user_pool_id = Some(expect_string(tokens.next())?),
                TIMESTAMP => timestamp = Some(expect_string(tokens.next())?),
                _ => aws_smithy_json::deserialize::token::skip_value(tokens)?,
            }
            Ok(())
        })
        .map_err(|err| ContextDataError::invalid_envelope("malformed payload", Some(err.into())))?;

        Ok(Self {
            context_data: context_data
                .ok_or_else(|| missing(CONTEXT_DATA))?
                .into_iter()
                .collect(),
            username: username.ok_or_else(|| missing(USERNAME))?,
            user_pool_id: user_pool_id.ok_or_else(|| missing(USER_POOL_ID))?,
            timestamp: timestamp.ok_or_else(|| missing(TIMESTAMP))?,
        })
    }
}

fn missing(key: &'static str) -> ContextDataError {
    ContextDataError::invalid_envelope(format!("payload is missing `{key}`"), None)
}
