use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ask_skill::api::ApiServer;
use ask_skill::skill::router::ASK_INTENT;
use ask_skill::{Config, RequestEnvelope, Skill};

/// Ask Skill - voice assistant skill answering questions with an LLM
#[derive(Parser)]
#[command(name = "ask-skill", version, about)]
struct Cli {
    /// Port to listen on (overrides config)
    #[arg(long, env = "ASK_SKILL_PORT")]
    port: Option<u16>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the skill endpoint (default)
    Serve,
    /// Ask a question locally and print the spoken response
    Ask {
        /// The question, as it would be spoken
        question: String,
    },
    /// Resolve and print the model that would answer
    Model,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,ask_skill=info",
        1 => "info,ask_skill=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load();
    tracing::debug!(?config, "loaded configuration");

    if !config.has_api_key() {
        tracing::warn!("OPENROUTER_API_KEY not set, questions will get an apology");
    }

    let port = cli.port.unwrap_or(config.api_server.port);
    let skill = Arc::new(Skill::from_config(&config)?);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            tracing::info!(port, "starting ask skill");
            let application_id = config.api_server.application_id.clone();
            if application_id.is_none() {
                tracing::warn!("ASK_SKILL_APPLICATION_ID not set, accepting any envelope");
            }
            ApiServer::new(skill, port, application_id).run().await?;
        }
        Command::Ask { question } => {
            let envelope = RequestEnvelope::intent(ASK_INTENT, &[("prompt", question.as_str())]);
            let response = skill.handle(&envelope).await;

            println!("{}", response.spoken_text().unwrap_or_default());
            if let Some(reprompt) = response.reprompt_text() {
                println!("(reprompt) {reprompt}");
            }
        }
        Command::Model => {
            println!("{}", skill.resolver().resolve().await);
        }
    }

    Ok(())
}
