//! Public contact form endpoint.

use axum::extract::State;
use axum::Json;
use marquee_core::contact::{resolve_recipient, ContactRequest};
use marquee_core::types::DbId;
use marquee_db::models::contact_submission::CreateContactSubmission;
use marquee_db::repositories::{ContactSettingsRepo, ContactSubmissionRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ContactReceipt {
    pub success: bool,
    pub id: DbId,
    /// Whether a notification was handed to the delivery channel.
    pub sent: bool,
}

/// POST /api/v1/contact
///
/// The submission is stored first. Notification failures are logged and
/// reported as `sent: false`; the stored row is kept. `recipientEmail` is
/// honoured only for addresses the site already knows, see
/// [`resolve_recipient`].
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<ContactRequest>,
) -> AppResult<Json<DataResponse<ContactReceipt>>> {
    let request = input.normalized();
    request.check()?;

    let submission = ContactSubmissionRepo::create(
        &state.pool,
        &CreateContactSubmission {
            name: request.name.clone(),
            email: request.email.clone(),
            subject: request.subject.clone(),
            message: request.message.clone(),
        },
    )
    .await?;
    tracing::info!(submission_id = %submission.id, "Contact submission stored");

    let management = match ContactSettingsRepo::management_email(&state.pool).await {
        Ok(configured) => configured,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read management email, using default");
            None
        }
    };
    let recipient = resolve_recipient(
        request.recipient_email.as_deref(),
        management.as_deref(),
        &state.config.contact_default_recipient,
        &state.config.admin_emails,
    );
    if request.recipient_email.as_deref().is_some_and(|r| r != recipient) {
        tracing::warn!(
            submission_id = %submission.id,
            "Ignoring unknown recipientEmail on contact submission"
        );
    }

    let sent = match state.notifier.notify(&recipient, &request.message()).await {
        Ok(sent) => sent,
        Err(e) => {
            tracing::warn!(
                submission_id = %submission.id,
                channel = state.notifier.channel(),
                error = %e,
                "Contact notification failed"
            );
            false
        }
    };

    Ok(Json(DataResponse {
        data: ContactReceipt {
            success: true,
            id: submission.id,
            sent,
        },
    }))
}
