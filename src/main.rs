use actix_cors::Cors;
use actix_web::{middleware, App, HttpServer};
use skillmatch::config::Settings;
use skillmatch::core::{RecommendationEngine, SkillExtractor};
use skillmatch::routes::{self, AppState};
use skillmatch::services::{load_dictionary, load_jobs};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn startup_error(message: String) -> std::io::Error {
    error!("{}", message);
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration; errors are reported once logging is up
    let settings = Settings::load();

    // Initialize logging (LOG_LEVEL / LOG_FORMAT win over the config file)
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    let log_level = std::env::var("LOG_LEVEL").unwrap_or(logging.level);
    let log_format = std::env::var("LOG_FORMAT").unwrap_or(logging.format);

    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }

    info!("Starting Skillmatch recommendation service...");

    let settings =
        settings.map_err(|e| startup_error(format!("Failed to load configuration: {}", e)))?;

    info!("Configuration loaded successfully");

    // Dictionary and catalog are read once and shared read-only
    let dictionary = load_dictionary(&settings.catalog.skills_path)
        .map_err(|e| startup_error(format!("Failed to load skill dictionary: {}", e)))?;

    let catalog = load_jobs(&settings.catalog.jobs_path)
        .map_err(|e| startup_error(format!("Failed to load job catalog: {}", e)))?;

    let extractor = SkillExtractor::new(dictionary, settings.extraction.mode)
        .map_err(|e| startup_error(e.to_string()))?;

    info!(
        "Skill extractor initialized ({} skills, {:?} mode)",
        extractor.dictionary().len(),
        extractor.mode()
    );

    let engine = RecommendationEngine::new(settings.scoring.strategy)
        .with_min_score(settings.scoring.min_score)
        .with_catalog(&catalog);

    info!(
        "Recommendation engine initialized ({:?}, min score {})",
        settings.scoring.strategy, settings.scoring.min_score
    );

    // Build application state
    let app_state = AppState {
        extractor: Arc::new(extractor),
        catalog: Arc::new(catalog),
        engine,
        matching: settings.matching.clone(),
    };

    // Configure HTTP server
    let server = settings.server.clone();
    let host = server.host.clone();
    let port = server.port;
    let workers = server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_app(app_state.clone(), &server))
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
