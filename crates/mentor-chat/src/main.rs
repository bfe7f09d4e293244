//! A terminal chat window with a friendly Python mentor.

#[macro_use]
extern crate tracing;

use std::env;
use std::process::ExitCode;

use mentor_chat::{App, ChatConfig, SessionBuilder, terminal};
use mentor_chat_openai_model::OpenAIProvider;
use owo_colors::OwoColorize;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "mentor-chat.log";

#[tokio::main]
async fn main() -> ExitCode {
    // The window owns the terminal, so logs go to a file.
    let _guard = init_logging();

    let config = match ChatConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {err}", "error:".bright_red().bold());
            return ExitCode::FAILURE;
        }
    };
    info!(?config, "starting");

    let model_provider = OpenAIProvider::new(config.openai_config());
    info!(
        model = model_provider.config().model(),
        base_url = model_provider.config().base_url(),
        "using provider"
    );
    let (session, render_queue) =
        SessionBuilder::with_model_provider(model_provider).build();
    let mut app = App::new(session);

    if let Err(err) = terminal::run(&mut app, render_queue).await {
        error!("terminal error: {err}");
        eprintln!("{} {err}", "error:".bright_red().bold());
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn init_logging() -> WorkerGuard {
    let file_appender =
        tracing_appender::rolling::never(env::temp_dir(), LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}
