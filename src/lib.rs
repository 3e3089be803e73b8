pub mod admin;
pub mod api;
pub mod core;
pub mod session;
pub mod utils;
pub mod verification;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use parking_lot::Mutex;
use tracing::info;

use crate::{
    core::services::{health::HealthService, wizard::WizardService},
    session::SessionStore,
    utils::{
        config::Config,
        error::{KycError, Result},
    },
    verification::create_backend,
};

pub struct Application {
    config: Arc<Config>,
    wizard_service: Arc<WizardService>,
    health_service: Arc<HealthService>,
    server_handle: Mutex<Option<actix_web::dev::ServerHandle>>,
}

impl Application {
    pub async fn new(config: Config) -> Result<Self> {
        let config = Arc::new(config);

        info!("Initializing session store...");
        let sessions = Arc::new(SessionStore::new());

        info!(
            "Initializing verification backend ({:?})...",
            config.backend.verification
        );
        let backend = create_backend(&config.backend)?;

        info!("Initializing services...");
        let health_service = Arc::new(HealthService::new());
        let wizard_service = Arc::new(WizardService::new(
            sessions,
            backend,
            health_service.clone(),
        ));

        Ok(Self {
            config,
            wizard_service,
            health_service,
            server_handle: Mutex::new(None),
        })
    }

    pub async fn start(&self) -> Result<()> {
        use crate::api::handlers;

        let wizard_service = self.wizard_service.clone();
        let health_service = self.health_service.clone();
        let allowed_origins = self.config.node.allowed_origins.clone();

        info!("Starting API server...");
        let server = HttpServer::new(move || {
            let cors = if allowed_origins.is_empty() {
                Cors::permissive()
            } else {
                allowed_origins
                    .iter()
                    .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
                    .allow_any_method()
                    .allow_any_header()
            };

            App::new()
                .wrap(cors)
                .app_data(web::Data::from(wizard_service.clone()))
                .app_data(web::Data::from(health_service.clone()))
                .service(handlers::wizard::scope())
                .service(handlers::health::scope())
        })
        .bind((self.config.node.host.as_str(), self.config.node.port))
        .map_err(|e| KycError::Config(format!("failed to bind API server: {e}")))?
        .run();

        *self.server_handle.lock() = Some(server.handle());
        tokio::spawn(server);

        info!(
            "API server listening on {}:{}",
            self.config.node.host, self.config.node.port
        );
        Ok(())
    }

    pub async fn shutdown(&self) -> Result<()> {
        info!("Shutting down application...");

        let handle = self.server_handle.lock().take();
        if let Some(handle) = handle {
            handle.stop(true).await;
        }

        info!("Application shutdown complete");
        Ok(())
    }
}
