//! Error-kind contracts: which failures callers may retry, and the messages
//! they log.

use stepsbot::error::{DeliveryError, StoreError};

#[test]
fn store_errors_are_transient_except_malformed_rows() {
    assert!(StoreError::Read("offline".into()).is_transient());
    assert!(StoreError::Append("offline".into()).is_transient());
    assert!(StoreError::Timeout.is_transient());
    assert!(!StoreError::MalformedRow("bad date".into()).is_transient());
}

#[test]
fn error_messages_carry_the_cause() {
    assert_eq!(
        StoreError::Read("connection reset".into()).to_string(),
        "store read failed: connection reset"
    );
    assert_eq!(
        StoreError::MalformedRow("bad steps value: x".into()).to_string(),
        "malformed row: bad steps value: x"
    );
    assert_eq!(
        DeliveryError::Send("user blocked the bot".into()).to_string(),
        "message delivery failed: user blocked the bot"
    );
}
