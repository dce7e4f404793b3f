//! Helpline API server binary.
//!
//! Builds the providers and the chat log pool once at startup and serves
//! `POST /chat` until interrupted.

use std::sync::Arc;

use clap::Parser;
use helpline_core::chat::{ChatService, EscalationRoute};
use helpline_core::chat_log::{ChatLogStore, PgChatLogStore};
use helpline_core::completion::OpenAiCompletion;
use helpline_core::config::HelplineConfig;
use helpline_core::faq::FaqTable;
use helpline_core::messaging::TwilioMessaging;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "helpline_api_server", about = "Helpline support chat server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:5000")]
    bind_addr: String,

    /// PostgreSQL connection URL for the chat log store.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/helpline"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Skip running embedded migrations at startup. Without this flag startup
    /// waits for the database even though the pool itself is lazy.
    #[arg(long, default_value_t = false)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| {
                    tracing_subscriber::EnvFilter::try_new(
                        "info,helpline_api=debug,helpline_core=debug",
                    )
                })?,
        )
        .init();

    let args = Args::parse();

    info!(bind_addr = %args.bind_addr, max_connections = args.max_connections, "starting helpline_api_server");

    // Lazy connect: an unreachable store only fails the requests that log.
    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .connect_lazy(&args.database_url)?;

    if !args.skip_migrations {
        info!("running database migrations");
        helpline_core::migrate::migrate(&pool).await?;
    }

    let config = HelplineConfig::from_env();
    let http = reqwest::Client::new();
    let store: Arc<dyn ChatLogStore> = Arc::new(PgChatLogStore::new(pool));

    let chat = ChatService::new(
        FaqTable::builtin(),
        Arc::new(OpenAiCompletion::with_client(http.clone(), config.openai.clone())),
        Arc::new(TwilioMessaging::with_client(http, config.twilio.clone())),
        store.clone(),
        EscalationRoute {
            from: config.twilio.from_number.clone(),
            to: config.twilio.admin_number.clone(),
        },
    );

    let state = helpline_api::AppState {
        chat: Arc::new(chat),
        store,
    };

    let app = helpline_api::router(state);
    let listener = tokio::net::TcpListener::bind(&args.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
