use super::ApplyUserChangeUseCase;
use crate::error::ApiError;
use crate::shared::usecase::execute;
use actix_web::{web, HttpResponse};
use birthday_scheduler_api_structs::dtos::UserChangeMessageDTO;
use birthday_scheduler_api_structs::process_user_changes::*;
use birthday_scheduler_infra::BirthdayContext;
use futures::future::join_all;
use std::time::Duration;
use tracing::{error, warn};

/// Ingests a batch of user change messages from the user store's transport.
/// Messages are applied concurrently and independently: one bad or failing
/// message never aborts its siblings, it is only counted as failed so the
/// transport can redeliver the batch.
pub async fn process_user_changes_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<BirthdayContext>,
) -> Result<HttpResponse, ApiError> {
    let outcomes = join_all(
        body.0
            .messages
            .into_iter()
            .map(|message| handle_message(message, &ctx)),
    )
    .await;

    let applied = outcomes.iter().filter(|applied| **applied).count();
    let failed = outcomes.len() - applied;
    Ok(HttpResponse::Ok().json(APIResponse { applied, failed }))
}

async fn handle_message(message: UserChangeMessageDTO, ctx: &BirthdayContext) -> bool {
    let event = match message.into_change_event() {
        Ok(event) => event,
        Err(e) => {
            warn!("Discarding malformed user change message: {}", e);
            return false;
        }
    };

    let user_id = event.user_id().clone();
    let timeout = Duration::from_millis(ctx.config.apply_timeout_millis);
    let usecase = ApplyUserChangeUseCase { event };
    match tokio::time::timeout(timeout, execute(usecase, ctx)).await {
        Ok(Ok(_)) => true,
        Ok(Err(_)) => false,
        Err(_) => {
            error!("Processing of user change for user {} timed out", user_id);
            false
        }
    }
}
