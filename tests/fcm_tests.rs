use std::collections::HashMap;

use emergency_dispatch::{
    clients::fcm::{FcmClient, MessageSender},
    models::fcm::{FcmMessage, FcmNotification},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

fn sample_message() -> FcmMessage {
    let data = HashMap::from([
        ("type".to_string(), "emergency".to_string()),
        ("requestId".to_string(), "req_123".to_string()),
        ("requesterId".to_string(), "user_42".to_string()),
        ("requesterName".to_string(), "Alice".to_string()),
        ("skill".to_string(), "First Aid".to_string()),
        ("channel_id".to_string(), "emergency_channel".to_string()),
        ("isOwnRequest".to_string(), "false".to_string()),
        (
            "click_action".to_string(),
            "FLUTTER_NOTIFICATION_CLICK".to_string(),
        ),
    ]);

    FcmMessage {
        topic: "skill_first_aid".to_string(),
        notification: FcmNotification {
            title: "Emergency Request: Flooded basement".to_string(),
            body: "Alice needs help with First Aid".to_string(),
        },
        data,
    }
}

/// Test: the send request carries the FCM v1 wire shape and bearer auth
#[tokio::test]
async fn test_send_posts_fcm_v1_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/projects/test-project/messages:send"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(serde_json::json!({
            "message": {
                "topic": "skill_first_aid",
                "notification": {
                    "title": "Emergency Request: Flooded basement",
                    "body": "Alice needs help with First Aid"
                },
                "data": {
                    "type": "emergency",
                    "isOwnRequest": "false",
                    "channel_id": "emergency_channel",
                    "click_action": "FLUTTER_NOTIFICATION_CLICK"
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "projects/test-project/messages/1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = FcmClient::with_static_token(
        format!("{}/v1/projects/test-project/messages:send", server.uri()),
        "test-token",
    );

    client.send(&sample_message()).await.unwrap();
}

/// Test: a non-2xx response surfaces as an error carrying the response text
#[tokio::test]
async fn test_send_error_carries_response_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid topic name"))
        .mount(&server)
        .await;

    let client = FcmClient::with_static_token(
        format!("{}/v1/projects/test-project/messages:send", server.uri()),
        "test-token",
    );

    let err = client.send(&sample_message()).await.unwrap_err();
    assert!(err.to_string().contains("invalid topic name"));
}
