mod birthday_checker;
mod error;
mod job_schedulers;
mod shared;
mod status;
mod user_change;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use birthday_scheduler_infra::BirthdayContext;
use error::ApiError;
use job_schedulers::start_birthday_checker_job;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    status::configure_routes(cfg);
    user_change::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: BirthdayContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        Application::start_job_schedulers(context);

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: BirthdayContext) {
        start_birthday_checker_job(context);
    }

    async fn configure_server(context: BirthdayContext) -> Result<(Server, u16), std::io::Error> {
        let address = format!("0.0.0.0:{}", context.config.port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                    ApiError::BadClientData(err.to_string()).into()
                }))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
