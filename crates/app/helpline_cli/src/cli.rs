use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "helpline", about = "Helpline operator CLI", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the CLI version.
    Version,

    /// Print the built-in FAQ table.
    Faq,

    /// Run one message through the chat pipeline and print the reply.
    ///
    /// Uses the same providers and chat log store as the server.
    Ask {
        /// Customer message.
        message: String,

        /// Sender identifier recorded with the chat log.
        #[arg(long, default_value = "")]
        phone: String,

        /// PostgreSQL connection URL for the chat log store.
        #[arg(
            long,
            env = "DATABASE_URL",
            default_value = "postgres://localhost:5432/helpline"
        )]
        database_url: String,

        /// Also print where the reply came from.
        #[arg(long, default_value_t = false)]
        verbose: bool,
    },
}
