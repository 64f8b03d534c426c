use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Medication order payload as submitted by a caller.
///
/// Every field is optional at the serde level so that missing fields surface
/// as validation errors rather than as a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct MedicationOrder {
    #[validate(
        required(message = "field is required"),
        length(min = 1, message = "must not be empty")
    )]
    pub patient_id: Option<String>,

    #[serde(alias = "drug")]
    #[validate(
        required(message = "field is required"),
        length(min = 1, message = "must not be empty")
    )]
    pub medication: Option<String>,

    #[validate(
        required(message = "field is required"),
        length(min = 1, message = "must not be empty")
    )]
    pub dose: Option<String>,

    #[validate(
        required(message = "field is required"),
        length(min = 1, message = "must not be empty")
    )]
    pub route: Option<String>,

    #[validate(
        required(message = "field is required"),
        length(min = 1, message = "must not be empty")
    )]
    pub frequency: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Draft,
}

/// Receipt for a draft order. Nothing is persisted or dispatched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftAcknowledgement {
    pub order_id: String,
    pub status: OrderStatus,
    pub order: MedicationOrder,
    pub received_at: NaiveDateTime,
}
