use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use aetherium_gateway::{
    ApiServerBuilder, Config, Instrumented, OpenAiCompletionClient, WhatlangDetector,
    WhisperTranscriptionClient,
};

/// Aetherium - chat and voice-to-chat backend
#[derive(Parser)]
#[command(name = "aetherium", version, about)]
struct Cli {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "8000")]
    port: u16,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Missing .env is fine; the environment may already be populated
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,aetherium_gateway=info",
        1 => "info,aetherium_gateway=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded environment file");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    tracing::debug!(?config, "loaded configuration");

    let chat_client = OpenAiCompletionClient::new(&config.openai)?;

    tracing::info!(
        host = %cli.host,
        port = cli.port,
        model = chat_client.model(),
        transcription_model = %config.openai.transcription_model,
        timeout_secs = config.openai.timeout.as_secs(),
        "starting aetherium gateway"
    );

    let completion = Instrumented::new(chat_client, config.openai.timeout);
    let transcription = Instrumented::new(
        WhisperTranscriptionClient::new(&config.openai)?,
        config.openai.timeout,
    );

    let server = ApiServerBuilder::new(
        Arc::new(completion),
        Arc::new(transcription),
        Arc::new(WhatlangDetector::new()),
    )
    .host(cli.host)
    .port(cli.port)
    .server_config(config.server)
    .build();

    server.run().await?;

    Ok(())
}
