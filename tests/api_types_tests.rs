//! External tests for the wire types — serialization field names and
//! response deserialization against captured server shapes.

use device_console::api::{Ack, Action, DeviceStatus, LogEntry, LoginOk, LoginRequest, RegisterRequest};

// -- Request bodies ---------------------------------------------------------

#[test]
fn test_register_request_wire_shape() {
    let req = RegisterRequest {
        device_name: "porch-light".to_string(),
        enroll_id: "ENR-7".to_string(),
    };
    let value: serde_json::Value = serde_json::to_value(&req).expect("serialize");
    assert_eq!(value["deviceName"], "porch-light");
    assert_eq!(value["enrollId"], "ENR-7");
    assert_eq!(value.as_object().unwrap().len(), 2);
}

#[test]
fn test_login_request_wire_shape() {
    let req = LoginRequest {
        enroll_id: "ENR-7".to_string(),
    };
    let value: serde_json::Value = serde_json::to_value(&req).expect("serialize");
    assert_eq!(value["enrollId"], "ENR-7");
    assert_eq!(value.as_object().unwrap().len(), 1);
}

// -- Response bodies --------------------------------------------------------

#[test]
fn test_login_response_deserializes_all_fields() {
    let ok: LoginOk = serde_json::from_str(
        r#"{"token":"opaque-bearer","deviceName":"porch-light","enrollId":"ENR-7"}"#,
    )
    .expect("deserialize");
    assert_eq!(ok.token, "opaque-bearer");
    assert_eq!(ok.device_name, "porch-light");
    assert_eq!(ok.enroll_id, "ENR-7");
}

#[test]
fn test_status_deserializes_free_text_label() {
    let status: DeviceStatus =
        serde_json::from_str(r#"{"status":"standby","lastValue":"n/a"}"#).expect("deserialize");
    assert_eq!(status.status, "standby");
    assert_eq!(status.last_value, "n/a");
}

#[test]
fn test_ack_without_message_deserializes() {
    let ack: Ack = serde_json::from_str("{}").expect("deserialize");
    assert!(ack.message.is_none());
}

#[test]
fn test_ack_with_message_deserializes() {
    let ack: Ack = serde_json::from_str(r#"{"message":"Already enrolled"}"#).expect("deserialize");
    assert_eq!(ack.message.as_deref(), Some("Already enrolled"));
}

#[test]
fn test_log_sequence_preserves_server_order() {
    let logs: Vec<LogEntry> = serde_json::from_str(
        r#"[
            {"action":"turn-off","timestamp":"2024-03-02T08:00:00Z"},
            {"action":"turn-on","timestamp":"2024-03-01T08:00:00Z"},
            {"action":"turn-on","timestamp":"2024-03-01T08:00:00Z"}
        ]"#,
    )
    .expect("deserialize");
    // Neither sorted nor deduplicated locally.
    assert_eq!(logs.len(), 3);
    assert_eq!(logs[0].action, "turn-off");
    assert_eq!(logs[1].action, logs[2].action);
}

#[test]
fn test_log_timestamp_is_opaque_text() {
    let logs: Vec<LogEntry> =
        serde_json::from_str(r#"[{"action":"turn-on","timestamp":"last Tuesday"}]"#)
            .expect("deserialize");
    assert_eq!(logs[0].timestamp, "last Tuesday");
}

// -- Action -----------------------------------------------------------------

#[test]
fn test_action_names_match_endpoints() {
    assert_eq!(Action::On.to_string(), "on");
    assert_eq!(Action::Off.to_string(), "off");
}
