// Import necessary modules
mod app_state;
mod config;
mod database;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod utils;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use app_state::AppState;
use config::Config;
use database::init::init_db;
use log::{error, info, warn};
use models::build_descriptor::BuildDescriptor;
use repositories::document_repository::PgDocumentStore;
use routes::app_routes::create_router;
use services::fcm_service::FcmClient;
use services::jwt_service::ServiceAccountKey;
use services::notification_service::NotificationForwarder;
use tokio::signal;

// The main entry point for the application using the tokio runtime.
#[tokio::main]
async fn main() {
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    let build = BuildDescriptor::new(config.toolchain.clone());
    if let Err(e) = build.validate() {
        error!("Invalid build descriptor: {}", e);
        return;
    }
    if build.is_release_signing_temporary() {
        warn!("Release builds of {} are signed with debug keys", build.application_id);
    }

    // Shared handles, created once for the lifetime of the process
    let pool = match init_db(&config.database_url, config.run_migrations).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Error initializing the database: {}", e);
            return;
        }
    };

    let credentials = match ServiceAccountKey::from_file(&config.credentials_path) {
        Ok(credentials) => credentials,
        Err(e) => {
            error!("Error loading service account: {}", e);
            return;
        }
    };

    let messenger = match FcmClient::new(credentials, config.project_id.clone(), &config.fcm_endpoint) {
        Ok(client) => client,
        Err(e) => {
            error!("Error creating FCM client: {}", e);
            return;
        }
    };
    info!("Push notifications go to FCM project {}", messenger.project_id());

    let forwarder = NotificationForwarder::new(
        Arc::new(PgDocumentStore::new(pool)),
        Arc::new(messenger),
    );
    if config.trigger_secret.is_none() {
        warn!("TRIGGER_SECRET is not set; the trigger route accepts unauthenticated calls");
    }
    let state = AppState::new(Arc::new(forwarder), build, config.trigger_secret.clone());

    let app = create_router(state);

    info!("Server running on http://{}", config.bind_addr);

    if let Err(e) = axum::Server::bind(&config.bind_addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
    }
}

// A function to handle graceful shutdown by listening for termination signals.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Signal received, starting graceful shutdown");
}
