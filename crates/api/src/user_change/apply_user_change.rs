use crate::shared::usecase::UseCase;
use birthday_scheduler_domain::{
    next_occurrence, BirthdayNotification, ChangeEvent, DayIndexEntry, NotificationType,
    OccurrenceError, Schedule, User,
};
use birthday_scheduler_infra::{BackendError, BirthdayContext};
use thiserror::Error;
use tracing::{error, info, warn};

/// Applies a single user change event to the schedule state: keeps the day
/// index in sync and registers, replaces or cancels the user's one-shot
/// trigger.
#[derive(Debug)]
pub struct ApplyUserChangeUseCase {
    pub event: ChangeEvent,
}

#[derive(Debug)]
pub enum AppliedChange {
    Scheduled(Schedule),
    Unchanged,
    Cancelled,
}

#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("Unable to compute the next birthday occurrence: {0}")]
    Occurrence(OccurrenceError),
    #[error("Trigger backend call failed: {0}")]
    TriggerBackend(BackendError),
}

#[async_trait::async_trait(?Send)]
impl UseCase for ApplyUserChangeUseCase {
    type Response = AppliedChange;

    type Error = UseCaseError;

    const NAME: &'static str = "ApplyUserChange";

    async fn execute(&mut self, ctx: &BirthdayContext) -> Result<Self::Response, Self::Error> {
        // All schedule mutations for one user are serialized; concurrent
        // events for the same user must not interleave cancel and register.
        let _guard = ctx.user_locks.acquire(self.event.user_id()).await;

        match &self.event {
            ChangeEvent::Created(user) => {
                info!("Handle user created: {}", user.id);
                schedule_user(user, ctx).await.map(AppliedChange::Scheduled)
            }
            ChangeEvent::Updated { old, new } => {
                info!("Handle user updated: {}", new.id);
                if old.same_schedule_inputs(new) {
                    return Ok(AppliedChange::Unchanged);
                }

                let old_key = old.birth_date.birthday_key();
                if ctx.repos.day_index.delete(&old_key, &old.id).await.is_none() {
                    warn!(
                        "No day index entry to remove for user {} under key {}",
                        old.id, old_key
                    );
                }

                let name = Schedule::trigger_name_for(NotificationType::Birthday, &new.id);
                if let Err(e) = ctx.services.trigger_backend.cancel(&name).await {
                    // Non-fatal: registering below overwrites the trigger
                    warn!("Unable to cancel trigger {} before rescheduling: {:?}", name, e);
                }

                schedule_user(new, ctx).await.map(AppliedChange::Scheduled)
            }
            ChangeEvent::Deleted(old) => {
                info!("Handle user deleted: {}", old.id);
                let _ = ctx
                    .repos
                    .day_index
                    .delete(&old.birth_date.birthday_key(), &old.id)
                    .await;

                let name = Schedule::trigger_name_for(NotificationType::Birthday, &old.id);
                ctx.services
                    .trigger_backend
                    .cancel(&name)
                    .await
                    .map_err(UseCaseError::TriggerBackend)?;
                Ok(AppliedChange::Cancelled)
            }
        }
    }
}

async fn schedule_user(user: &User, ctx: &BirthdayContext) -> Result<Schedule, UseCaseError> {
    // Index writes are best-effort and must not abort scheduling
    let entry = DayIndexEntry::from_user(user, ctx.sys.get_timestamp_millis());
    if let Err(e) = ctx.repos.day_index.upsert(&entry).await {
        error!("Unable to store day index entry for user {}: {:?}", user.id, e);
    }

    let fire_at = next_occurrence(
        &user.birth_date,
        user.timezone,
        ctx.sys.now(),
        ctx.config.notification_time,
    )
    .map_err(UseCaseError::Occurrence)?;

    let schedule = Schedule::new(NotificationType::Birthday, user.id.clone(), fire_at);
    let payload = BirthdayNotification::for_user(user);
    ctx.services
        .trigger_backend
        .register(&schedule, &payload)
        .await
        .map_err(UseCaseError::TriggerBackend)?;

    info!(
        "Birthday notification for user {} scheduled at {}",
        user.id, schedule.fire_at
    );
    Ok(schedule)
}
