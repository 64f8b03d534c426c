use chrono::NaiveDateTime;
use uuid::Uuid;
use validator::Validate;

use crate::error::ServiceError;
use crate::models::{DraftAcknowledgement, MedicationOrder, OrderStatus};

/// Validate a medication order and issue a draft acknowledgement for it.
pub fn acknowledge_draft(
    order: MedicationOrder,
    received_at: NaiveDateTime,
) -> Result<DraftAcknowledgement, ServiceError> {
    order.validate()?;

    Ok(DraftAcknowledgement {
        order_id: format!("draft-{}", Uuid::new_v4()),
        status: OrderStatus::Draft,
        order,
        received_at,
    })
}
