use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use supportline::chat::ChatService;
use supportline::config::AppConfig;
use supportline::db;
use supportline::llm::ProviderFactory;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "supportline", about = "Customer-support chat backend")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    info!("Starting supportline chat backend...");

    let config = match AppConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let db_pool = match db::get_connection(&config.database) {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    let gateway = match ProviderFactory::create(&config) {
        Some(g) => g,
        None => {
            error!("Unknown LLM provider '{}' in configuration", config.llm.provider);
            std::process::exit(1);
        }
    };

    let service = web::Data::new(ChatService::new(
        db_pool,
        gateway,
        config.chat.clone(),
    ));

    let host = config.server.host.clone();
    let port = config.server.port;

    info!("Server listening on {}:{} (model: {})", host, port, config.llm.model);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(service.clone())
            .route("/health", web::get().to(health))
            .configure(supportline::api::routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
