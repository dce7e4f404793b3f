// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use std::sync::Arc;

use clap::Parser;
use cli::{Cli, Commands};
use helpline_core::chat::{ChatRequest, ChatService, EscalationRoute};
use helpline_core::chat_log::PgChatLogStore;
use helpline_core::completion::OpenAiCompletion;
use helpline_core::config::HelplineConfig;
use helpline_core::faq::FaqTable;
use helpline_core::messaging::TwilioMessaging;
use sqlx::postgres::PgPoolOptions;

mod cli;
mod logging;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init()?;

    let args = Cli::parse();

    match args.command {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Commands::Faq => {
            for (question, answer) in FaqTable::builtin().entries() {
                println!("Q: {question}");
                println!("A: {answer}");
                println!();
            }
        }
        Commands::Ask {
            message,
            phone,
            database_url,
            verbose,
        } => {
            ask(ChatRequest::new(message, phone), &database_url, verbose).await?;
        }
    }

    Ok(())
}

async fn ask(request: ChatRequest, database_url: &str, verbose: bool) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await?;
    helpline_core::migrate::migrate(&pool).await?;

    let config = HelplineConfig::from_env();
    let store = Arc::new(PgChatLogStore::new(pool));
    let chat = ChatService::new(
        FaqTable::builtin(),
        Arc::new(OpenAiCompletion::new(config.openai.clone())),
        Arc::new(TwilioMessaging::new(config.twilio.clone())),
        store.clone(),
        EscalationRoute {
            from: config.twilio.from_number,
            to: config.twilio.admin_number,
        },
    );

    let outcome = chat.handle(&request).await?;
    if let Some(e) = &outcome.completion_error {
        log::warn!("completion failed: {e}");
    }
    if let Some(e) = &outcome.escalation_error {
        log::warn!("escalation failed: {e}");
    }
    if verbose {
        println!("[{:?}] {}", outcome.source, outcome.reply);
        let logged = store.count_for_user(&request.phone).await?;
        println!("({logged} chat log records for '{}')", request.phone);
    } else {
        println!("{}", outcome.reply);
    }

    Ok(())
}
