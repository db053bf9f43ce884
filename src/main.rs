use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use ecoscan::config::{LoggingSettings, Settings};
use ecoscan::core::DisposalCatalog;
use ecoscan::routes::{self, AppState, UploadLimits};
use ecoscan::services::{ClassifierClient, UploadStore};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging);

    info!("Starting EcoScan backend...");

    // Upload directory must exist before the first request
    let store = UploadStore::new(settings.upload.dir.clone());
    if let Err(e) = store.ensure_dir().await {
        error!("{}", e);
        return Err(io::Error::new(io::ErrorKind::Other, e.to_string()));
    }

    info!("Storing uploads in {}", store.dir().display());

    let classifier = ClassifierClient::new(
        settings.classifier.url.clone(),
        Duration::from_secs(settings.classifier.timeout_secs),
    )
    .map_err(|e| {
        error!("Failed to create classifier client: {}", e);
        io::Error::new(io::ErrorKind::Other, e.to_string())
    })?;

    info!(
        "Classifier client initialized ({}, timeout: {}s)",
        classifier.url(),
        settings.classifier.timeout_secs
    );

    let catalog = DisposalCatalog::default();

    info!("Disposal catalog loaded ({} labels)", catalog.label_count());

    let app_state = AppState {
        store: Arc::new(store),
        classifier: Arc::new(classifier),
        catalog: Arc::new(catalog),
        limits: UploadLimits {
            default_extension: settings.upload.default_extension.clone(),
            max_bytes: settings.upload.max_bytes,
        },
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;

    info!("Starting HTTP server on {}:{}", host, port);

    let mut server = HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(routes::configure_routes)
    });

    if let Some(workers) = settings.server.workers {
        server = server.workers(workers);
    }

    server.bind((host, port))?.run().await
}
