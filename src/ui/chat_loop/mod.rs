//! Line-mode chat loop
//!
//! Reads one line at a time, hands it to the conversation engine and renders
//! whatever comes back as a panel. An interrupt future (Ctrl-C in the real
//! client) ends the session at any point, including while a reply is still in
//! flight.

mod banner;
mod setup;

pub use self::banner::print_startup;
pub use self::setup::{bootstrap, bootstrap_with_config, Bootstrap};

use std::future::Future;
use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::{debug, warn};

use crate::core::engine::{ConversationEngine, TurnOutcome, TurnOutput};
use crate::core::glitch::frame_weird_reply;
use crate::core::message::DisplayStyle;
use crate::core::session::Session;
use crate::core::transport::TransportError;
use crate::ui::panel::Console;

/// Bot replies are framed once weirdness goes past this.
const WEIRD_FRAME_THRESHOLD: f64 = 0.5;
const EXIT_MESSAGE: &str = "Exiting...";

enum Step {
    Interrupted,
    EndOfInput,
    Turn(Result<TurnOutcome, TransportError>),
    ReadError(io::Error),
}

pub struct ChatLoop<W: Write> {
    session: Session,
    engine: ConversationEngine,
    console: Console<W>,
    pending_prompt: Option<&'static str>,
    clear_on_start: bool,
}

impl<W: Write> ChatLoop<W> {
    pub fn new(session: Session, engine: ConversationEngine, console: Console<W>) -> Self {
        Self {
            session,
            engine,
            console,
            pending_prompt: None,
            clear_on_start: false,
        }
    }

    /// Clear the terminal before the startup banner.
    pub fn clear_on_start(mut self, clear: bool) -> Self {
        self.clear_on_start = clear;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_console(self) -> Console<W> {
        self.console
    }

    /// Run until `quit`, end of input, or `interrupt` resolves.
    ///
    /// Transport failures are shown and the loop carries on. Only failures to
    /// read input or write output end the loop with an error.
    pub async fn run<R, F>(&mut self, input: R, interrupt: F) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        F: Future<Output = ()>,
    {
        if self.clear_on_start {
            self.console.clear_screen()?;
        }
        print_startup(&mut self.console, self.session.bot_name())?;

        let mut lines = input.lines();
        tokio::pin!(interrupt);

        loop {
            self.show_prompt()?;

            let step = tokio::select! {
                biased;
                _ = &mut interrupt => Step::Interrupted,
                step = next_step(&mut lines, &mut self.engine, &mut self.session) => step,
            };

            match step {
                Step::Interrupted | Step::EndOfInput => {
                    debug!("input closed or interrupted");
                    self.console.blank_line()?;
                    let style = self.console.theme().error_style;
                    self.console.line(EXIT_MESSAGE, style)?;
                    return Ok(());
                }
                Step::Turn(Ok(TurnOutcome::Reply(output))) => {
                    self.pending_prompt = None;
                    self.show_output(&output)?;
                    if output.should_terminate {
                        return Ok(());
                    }
                }
                Step::Turn(Ok(TurnOutcome::NeedsInput { prompt })) => {
                    self.pending_prompt = Some(prompt);
                }
                Step::Turn(Err(err)) => {
                    warn!(error = %err, "chat request failed");
                    self.show_error(&err)?;
                }
                Step::ReadError(err) if err.kind() == io::ErrorKind::InvalidData => {
                    warn!(error = %err, "unreadable input line");
                    self.show_error(&err)?;
                }
                Step::ReadError(err) => return Err(err),
            }
        }
    }

    fn show_prompt(&mut self) -> io::Result<()> {
        let style = self.console.theme().style_for(DisplayStyle::User);
        match self.pending_prompt {
            Some(prompt) if self.engine.is_awaiting_input() => self.console.prompt(prompt, style),
            _ => {
                let prompt = format!(
                    "{}{}> ",
                    self.session.user_name(),
                    self.session.weirdness_indicator()
                );
                self.console.prompt(&prompt, style)
            }
        }
    }

    fn show_output(&mut self, output: &TurnOutput) -> io::Result<()> {
        let style = self.console.theme().style_for(output.style);
        match output.style {
            DisplayStyle::Bot => {
                let text = if self.session.weirdness() > WEIRD_FRAME_THRESHOLD {
                    frame_weird_reply(&output.text, &mut rand::thread_rng())
                } else {
                    output.text.clone()
                };
                self.console.panel(self.session.bot_name(), &text, style)
            }
            _ => self
                .console
                .panel(self.session.user_name(), &output.text, style),
        }
    }

    fn show_error(&mut self, err: &dyn std::error::Error) -> io::Result<()> {
        let style = self.console.theme().error_style;
        self.console.line(&format!("Error: {err}"), style)
    }
}

async fn next_step<R>(
    lines: &mut Lines<R>,
    engine: &mut ConversationEngine,
    session: &mut Session,
) -> Step
where
    R: AsyncBufRead + Unpin,
{
    let line = match lines.next_line().await {
        Ok(Some(line)) => line,
        Ok(None) => return Step::EndOfInput,
        Err(err) => return Step::ReadError(err),
    };
    Step::Turn(engine.process_turn(session, &line).await)
}
