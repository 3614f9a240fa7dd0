/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Token-stream helpers for reading the flat JSON objects used by the envelope and payload.

use aws_smithy_json::deserialize::error::DeserializeError;
use aws_smithy_json::deserialize::token::{expect_start_object, expect_string_or_null};
use aws_smithy_json::deserialize::{json_token_iter, JsonTokenIterator, Token};

/// Walks a single top-level JSON object, handing each key to `visit`.
///
/// `visit` must consume exactly one value from the token stream.
pub(crate) fn parse_object<'a, F>(input: &'a [u8], mut visit: F) -> Result<(), DeserializeError>
where
    F: FnMut(&str, &mut JsonTokenIterator<'a>) -> Result<(), DeserializeError>,
{
    let mut tokens = json_token_iter(input);
    expect_start_object(tokens.next())?;
    loop {
        match tokens.next().transpose()? {
            Some(Token::EndObject { .. }) => break,
            Some(Token::ObjectKey { key, .. }) => {
                let key = key.to_unescaped()?;
                visit(key.as_ref(), &mut tokens)?;
            }
            other => {
                return Err(DeserializeError::custom(format!(
                    "expected object key or end object, found: {other:?}"
                )))
            }
        }
    }
    if tokens.next().is_some() {
        return Err(DeserializeError::custom(
            "found more JSON tokens after completing parsing",
        ));
    }
    Ok(())
}

/// Reads a non-null string value.
pub(crate) fn expect_string(
    token: Option<Result<Token<'_>, DeserializeError>>,
) -> Result<String, DeserializeError> {
    match expect_string_or_null(token)? {
        Some(value) => Ok(value.to_unescaped()?.into_owned()),
        None => Err(DeserializeError::custom("expected a string, found null")),
    }
}

/// Reads an object whose values are all strings.
pub(crate) fn expect_string_map(
    tokens: &mut JsonTokenIterator<'_>,
) -> Result<Vec<(String, String)>, DeserializeError> {
    expect_start_object(tokens.next())?;
    let mut entries = Vec::new();
    loop {
        match tokens.next().transpose()? {
            Some(Token::EndObject { .. }) => return Ok(entries),
            Some(Token::ObjectKey { key, .. }) => {
                let key = key.to_unescaped()?.into_owned();
                let value = expect_string(tokens.next())?;
                entries.push((key, value));
            }
            other => {
                return Err(DeserializeError::custom(format!(
                    "expected object key or end object, found: {other:?}"
                )))
            }
        }
    }
}
