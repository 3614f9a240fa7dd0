/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_cognito_context_data::error::ErrorKind;
use aws_cognito_context_data::signals::{SignalMap, StaticSignals};
use aws_cognito_context_data::{sign, ContextDataProvider, Envelope, PROTOCOL_VERSION};
use aws_smithy_async::time::{StaticTimeSource, TimeSource};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const USERNAME: &str = "alice";
const USER_POOL_ID: &str = "us-east-1_ABC123";
const SECRET: &str = "client-secret-1";

/// Clock that advances by one millisecond every time it is read.
#[derive(Debug, Default)]
struct TickingTimeSource(AtomicU64);

impl TimeSource for TickingTimeSource {
    fn now(&self) -> SystemTime {
        let millis = 1_510_617_600_000 + self.0.fetch_add(1, Ordering::SeqCst);
        UNIX_EPOCH + Duration::from_millis(millis)
    }
}

fn pixel_signals() -> StaticSignals {
    StaticSignals::new([("platform", "android"), ("model", "Pixel")])
}

fn decode_json(encoded: &str) -> serde_json::Value {
    let bytes = base64::decode(encoded).expect("standard padded base64");
    serde_json::from_slice(&bytes).expect("envelope is JSON")
}

#[test]
fn test_pixel_scenario() {
    let provider = ContextDataProvider::builder()
        .signal_collector(pixel_signals())
        .build();
    let encoded = provider
        .encode(USERNAME, USER_POOL_ID, SECRET)
        .expect("context data is produced");

    let envelope = decode_json(encoded.as_str());
    let object = envelope.as_object().unwrap();
    let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["payload", "signature", "version"]);
    assert_eq!(object["version"], "ANDROID20171114");

    // the payload is a JSON document embedded as a string
    let payload_str = object["payload"].as_str().expect("payload is a string");
    let payload: serde_json::Value = serde_json::from_str(payload_str).unwrap();
    assert_eq!(
        payload["contextData"],
        serde_json::json!({"platform": "android", "model": "Pixel"})
    );
    assert_eq!(payload["username"], USERNAME);
    assert_eq!(payload["userPoolId"], USER_POOL_ID);
    assert!(payload["timestamp"]
        .as_str()
        .expect("timestamp is a string")
        .parse::<u64>()
        .is_ok());

    let signature = object["signature"].as_str().unwrap();
    assert_eq!(
        sign::sign(payload_str, SECRET, PROTOCOL_VERSION).unwrap(),
        signature
    );
}

#[test]
fn test_different_instants_produce_different_signatures() {
    let provider = ContextDataProvider::builder()
        .signal_collector(pixel_signals())
        .time_source(TickingTimeSource::default())
        .build();

    let first = provider.encode(USERNAME, USER_POOL_ID, SECRET).unwrap();
    let second = provider.encode(USERNAME, USER_POOL_ID, SECRET).unwrap();

    let first = first.decode().unwrap();
    let second = second.decode().unwrap();
    assert_ne!(first.payload(), second.payload());
    assert_ne!(first.signature(), second.signature());
    assert_eq!(
        first.parse_payload().unwrap().context_data(),
        second.parse_payload().unwrap().context_data()
    );
}

#[test]
fn test_missing_secret_never_produces_unsigned_envelope() {
    let provider = ContextDataProvider::builder()
        .signal_collector(pixel_signals())
        .build();

    let err = provider.encode(USERNAME, USER_POOL_ID, "").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingSecret);
    assert!(provider
        .encode_or_none(USERNAME, USER_POOL_ID, "")
        .is_none());
}

#[test]
fn test_shared_across_threads() {
    let provider = Arc::new(
        ContextDataProvider::builder()
            .signal_collector(pixel_signals())
            .time_source(StaticTimeSource::from_secs(1_510_617_600))
            .build(),
    );
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let provider = provider.clone();
            std::thread::spawn(move || {
                let username = format!("user-{i}");
                let envelope = provider
                    .encode(&username, USER_POOL_ID, SECRET)
                    .unwrap()
                    .decode()
                    .unwrap();
                assert!(envelope.verify(SECRET).unwrap());
                assert_eq!(envelope.parse_payload().unwrap().username(), username);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_envelope_from_other_client_verifies() {
    // an envelope assembled by hand, as another client implementation would
    let payload = r#"{"contextData":{"DeviceName":"Pixel 8"},"username":"alice","userPoolId":"us-east-1_ABC123","timestamp":"1510617600000"}"#;
    let signature = sign::sign(payload, SECRET, PROTOCOL_VERSION).unwrap();
    let encoded = Envelope::new(payload, signature).encode();

    let decoded = Envelope::decode(encoded.as_str()).unwrap();
    assert!(decoded.verify(SECRET).unwrap());
    assert!(!decoded.verify("client-secret-2").unwrap());
    let payload = decoded.parse_payload().unwrap();
    assert_eq!(
        payload.context_data(),
        &SignalMap::from([("DeviceName", "Pixel 8")])
    );
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn signal_map() -> impl Strategy<Value = Vec<(String, String)>> {
        proptest::collection::vec(("[A-Za-z]{1,12}", "\\PC{1,16}"), 0..8)
    }

    proptest! {
        #[test]
        fn test_round_trip_preserves_identity_and_signals(
            signals in signal_map(),
            username in "\\PC{0,32}",
            user_pool_id in "[a-z]{2}-[a-z]+-[0-9]_[A-Za-z0-9]{1,9}",
            secret in "\\PC{1,32}",
        ) {
            let signals: SignalMap = signals.into_iter().collect();
            let provider = ContextDataProvider::builder()
                .signal_collector(StaticSignals::new(signals.clone()))
                .time_source(StaticTimeSource::from_secs(1_510_617_600))
                .build();

            let envelope = provider
                .encode(&username, &user_pool_id, &secret)
                .unwrap()
                .decode()
                .unwrap();
            prop_assert!(envelope.verify(&secret).unwrap());

            let payload = envelope.parse_payload().unwrap();
            prop_assert_eq!(payload.context_data(), &signals);
            prop_assert_eq!(payload.username(), username.as_str());
            prop_assert_eq!(payload.user_pool_id(), user_pool_id.as_str());
        }

        #[test]
        fn test_distinct_secrets_give_distinct_signatures(
            payload in "\\PC{0,64}",
            a in "\\PC{1,16}",
            b in "\\PC{1,16}",
        ) {
            prop_assume!(a != b);
            prop_assert_ne!(
                sign::sign(&payload, &a, PROTOCOL_VERSION).unwrap(),
                sign::sign(&payload, &b, PROTOCOL_VERSION).unwrap()
            );
        }
    }
}
