use birthday_scheduler_api::Application;
use birthday_scheduler_infra::{setup_context, BirthdayContext};

// Launch the application as a background task. The returned context shares
// its repositories with the running app, so tests can observe state.
pub async fn spawn_app() -> (BirthdayContext, String) {
    let mut ctx = setup_context().await;
    ctx.config.port = 0; // Random port

    let context = ctx.clone();
    let application = Application::new(context)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    (ctx, address)
}
