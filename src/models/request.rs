use serde::{Deserialize, Serialize};

/// An emergency request record as written by the external record store.
///
/// The record is externally owned and not validated here: every field is
/// defaulted, so a record missing `title` or `requesterName` dispatches with
/// degraded notification content instead of being rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyRequest {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub requester_id: String,

    #[serde(default)]
    pub requester_name: String,

    #[serde(default)]
    pub required_skills: Vec<String>,
}

/// Trigger payload for a newly created record: the store-assigned id plus
/// the full field set. Emitted once per creation, never for updates or
/// deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyRequestCreated {
    pub request_id: String,
    pub request: EmergencyRequest,
}
