//! Command-line interface parsing and startup
//!
//! There are no subcommands: parsing only provides `--help` and `--version`
//! before the interactive session starts.

use std::error::Error;
use std::io::{self, IsTerminal};

use clap::Parser;
use tokio::io::BufReader;
use tracing::{info, warn};

use crate::ui::chat_loop::{bootstrap, Bootstrap, ChatLoop};
use crate::ui::panel::{Console, DEFAULT_WIDTH};
use crate::ui::theme::Theme;
use crate::utils::logging;

const LONG_VERSION: &str = match option_env!("VERGEN_GIT_DESCRIBE") {
    Some(describe) => describe,
    None => env!("CARGO_PKG_VERSION"),
};

#[derive(Parser)]
#[command(name = "glitchat")]
#[command(about = "A terminal chatbot whose replies get stranger the weirder it feels")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    long_about = "Glitchat is a line-mode terminal chat client for a single HTTP chat endpoint. \
Each message is sent together with the conversation so far and a short description of the \
bot's personality; replies are shown in bordered panels.\n\n\
Configuration:\n\
  config.toml in the working directory is used if present, otherwise the file in the \
platform config directory. A default file is written there on first run.\n\n\
Environment Variables:\n\
  GLITCHAT_LOG      Diagnostic log filter written to stderr (default: warn)\n\n\
Commands:\n\
  help              Show available commands\n\
  quit              Exit the chatbot\n\
  clear             Clear conversation history\n\
  change username   Pick a new display name\n\n\
Controls:\n\
  Enter             Send the message\n\
  Ctrl+C            Quit the application"
)]
pub struct Args {}

pub fn main() -> Result<(), Box<dyn Error>> {
    let _args = Args::parse();
    logging::init();

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(async_main());
    // Stdin is read on a blocking thread that may still be parked in read()
    runtime.shutdown_background();
    result
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let interactive = io::stdout().is_terminal();
    let theme = if interactive {
        Theme::dark_default()
    } else {
        Theme::monochrome()
    };
    let width = ratatui::crossterm::terminal::size()
        .map(|(columns, _)| columns)
        .unwrap_or(DEFAULT_WIDTH);
    let mut console = Console::new(io::stdout(), theme, width);

    let system_style = console.theme().system_style;
    console.line("Initializing chatbot...", system_style)?;

    let Bootstrap {
        config,
        session,
        engine,
    } = bootstrap()?;
    info!(bot = %config.bot_name, user = %config.user_name, "starting session");

    let mut chat = ChatLoop::new(session, engine, console).clear_on_start(interactive);
    let input = BufReader::new(tokio::io::stdin());
    chat.run(input, interrupt()).await?;
    Ok(())
}

async fn interrupt() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        // Without a handler the default signal disposition still ends the process
        warn!(error = %err, "could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
