use std::collections::HashMap;

use anyhow::{Error, Result};
use futures_util::{StreamExt, future};
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

use crate::{
    clients::{fcm::MessageSender, rbmq::RabbitMqClient},
    models::{
        dispatch::DispatchSummary,
        fcm::{FcmMessage, FcmNotification},
        request::EmergencyRequestCreated,
    },
};

/// Derives the pub/sub topic for a skill: lower-case, every run of one or
/// more whitespace characters replaced by a single underscore, prefixed with
/// `skill_`. `"Water Rescue"` becomes `"skill_water_rescue"`.
///
/// The input is not trimmed, so surrounding whitespace also collapses to
/// underscores.
pub fn skill_topic(skill: &str) -> String {
    let mut topic = String::with_capacity(skill.len() + 6);
    topic.push_str("skill_");

    let mut in_whitespace = false;
    for c in skill.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                topic.push('_');
                in_whitespace = true;
            }
        } else {
            topic.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }

    topic
}

fn build_message(event: &EmergencyRequestCreated, skill: &str) -> FcmMessage {
    let request = &event.request;

    let data = HashMap::from([
        ("type".to_string(), "emergency".to_string()),
        ("requestId".to_string(), event.request_id.clone()),
        ("requesterId".to_string(), request.requester_id.clone()),
        ("requesterName".to_string(), request.requester_name.clone()),
        ("skill".to_string(), skill.to_string()),
        ("channel_id".to_string(), "emergency_channel".to_string()),
        ("isOwnRequest".to_string(), "false".to_string()),
        (
            "click_action".to_string(),
            "FLUTTER_NOTIFICATION_CLICK".to_string(),
        ),
    ]);

    // The body keeps the skill as written; only the routing topic is
    // normalized.
    FcmMessage {
        topic: skill_topic(skill),
        notification: FcmNotification {
            title: format!("Emergency Request: {}", request.title),
            body: format!("{} needs help with {}", request.requester_name, skill),
        },
        data,
    }
}

/// Fans one created record out to the topic of every required skill,
/// duplicates included, and waits for all sends to settle.
///
/// Never returns an error: the triggering write already succeeded, and
/// surfacing a failure here would only provoke redelivery of the whole
/// record. Failed sends are logged; the others keep their effect.
pub async fn dispatch_emergency_request<S: MessageSender>(
    event: &EmergencyRequestCreated,
    sender: &S,
) -> DispatchSummary {
    info!(request_id = %event.request_id, "New emergency request created");

    let skills = &event.request.required_skills;

    if skills.is_empty() {
        info!(request_id = %event.request_id, "No required skills specified");
        return DispatchSummary::default();
    }

    let messages: Vec<FcmMessage> = skills.iter().map(|s| build_message(event, s)).collect();

    for message in &messages {
        debug!(topic = %message.topic, "Sending notification to topic");
    }

    let results = future::join_all(messages.iter().map(|m| sender.send(m))).await;

    let mut summary = DispatchSummary {
        attempted: results.len(),
        delivered: 0,
        failed: 0,
    };

    for (message, result) in messages.iter().zip(&results) {
        match result {
            Ok(()) => summary.delivered += 1,
            Err(e) => {
                summary.failed += 1;
                error!(
                    request_id = %event.request_id,
                    topic = %message.topic,
                    error = %e,
                    "Error sending emergency notification"
                );
            }
        }
    }

    if summary.failed == 0 {
        info!(
            request_id = %event.request_id,
            count = summary.delivered,
            "Successfully sent emergency notifications"
        );
    }

    summary
}

/// Handles one raw queue delivery. Never fails: an undecodable payload is
/// logged and dropped like any other post-commit error in this path.
pub async fn handle_delivery<S: MessageSender>(payload: &[u8], sender: &S) -> DispatchSummary {
    match serde_json::from_slice::<EmergencyRequestCreated>(payload) {
        Ok(event) => dispatch_emergency_request(&event, sender).await,
        Err(e) => {
            warn!(error = %e, "Discarding undecodable emergency request event");
            DispatchSummary::default()
        }
    }
}

/// Consumes created-record events and dispatches each one. Every delivery
/// is acked, dispatch outcome notwithstanding, so partial send failure
/// cannot trigger broker-level redelivery.
pub async fn run_dispatch_worker<S: MessageSender>(
    rabbitmq: &RabbitMqClient,
    sender: &S,
) -> Result<(), Error> {
    let mut consumer = rabbitmq.create_consumer().await?;

    info!("Dispatch worker started");

    while let Some(delivery) = consumer.next().await {
        let delivery = delivery?;

        handle_delivery(&delivery.data, sender)
            .instrument(info_span!("dispatch", trace_id = %Uuid::new_v4()))
            .await;

        rabbitmq.acknowledge(delivery.delivery_tag).await?;
    }

    Ok(())
}
