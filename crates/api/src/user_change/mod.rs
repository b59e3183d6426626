mod apply_user_change;
mod process_user_changes;

pub use apply_user_change::{AppliedChange, ApplyUserChangeUseCase};

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/user-changes",
        web::post().to(process_user_changes::process_user_changes_controller),
    );
}
