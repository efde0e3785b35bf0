//! Turns one line of input into one piece of output.
//!
//! The engine never touches the terminal. When a command needs a second line
//! (`change username`), it answers [`TurnOutcome::NeedsInput`] and treats the
//! next line it is given as the follow-up value.

use tracing::{debug, info};

use crate::api::{ChatRequest, START_CHAT_PROMPT};
use crate::commands::{classify, BuiltinCommand, Classification};
use crate::core::glitch::mangle;
use crate::core::message::{DisplayStyle, Sender, Turn};
use crate::core::session::Session;
use crate::core::transport::{Transport, TransportError};

pub const FALLBACK_REPLY: &str = "I'm sorry, I cannot respond at the moment.";
pub const SHUTDOWN_MESSAGE: &str = "Reality shutdown initiated... 🚨";
pub const USERNAME_PROMPT: &str = "Enter new username: ";

#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutput {
    pub text: String,
    pub should_terminate: bool,
    pub style: DisplayStyle,
}

impl TurnOutput {
    fn system(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            should_terminate: false,
            style: DisplayStyle::System,
        }
    }

    fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            should_terminate: false,
            style: DisplayStyle::Bot,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    Reply(TurnOutput),
    /// The next line passed to `process_turn` completes the pending command.
    NeedsInput { prompt: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingInput {
    UserName,
}

pub struct ConversationEngine {
    transport: Box<dyn Transport>,
    pending: Option<PendingInput>,
}

impl ConversationEngine {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            pending: None,
        }
    }

    /// True while a two-step command is waiting for its second line.
    pub fn is_awaiting_input(&self) -> bool {
        self.pending.is_some()
    }

    pub async fn process_turn(
        &mut self,
        session: &mut Session,
        line: &str,
    ) -> Result<TurnOutcome, TransportError> {
        if let Some(pending) = self.pending.take() {
            return Ok(TurnOutcome::Reply(Self::complete_pending(
                pending, session, line,
            )));
        }

        match classify(line) {
            Classification::Secret(secret) => {
                debug!(?secret, "secret command");
                Ok(TurnOutcome::Reply(TurnOutput::system(secret.apply(session))))
            }
            Classification::Builtin(BuiltinCommand::Quit) => {
                Ok(TurnOutcome::Reply(TurnOutput {
                    text: SHUTDOWN_MESSAGE.to_string(),
                    should_terminate: true,
                    style: DisplayStyle::System,
                }))
            }
            Classification::Builtin(BuiltinCommand::Clear) => {
                Ok(TurnOutcome::Reply(TurnOutput::system(session.clear())))
            }
            Classification::Builtin(BuiltinCommand::ChangeUsername) => {
                self.pending = Some(PendingInput::UserName);
                Ok(TurnOutcome::NeedsInput {
                    prompt: USERNAME_PROMPT,
                })
            }
            Classification::FreeText(text) => {
                let reply = self.chat(session, text).await?;
                Ok(TurnOutcome::Reply(TurnOutput::bot(reply)))
            }
        }
    }

    fn complete_pending(pending: PendingInput, session: &mut Session, line: &str) -> TurnOutput {
        match pending {
            PendingInput::UserName => {
                info!("user name changed");
                TurnOutput::system(session.set_user_name(line))
            }
        }
    }

    /// Send the conversation so far plus `text`, and record both sides only
    /// once a reply has arrived.
    async fn chat(&self, session: &mut Session, text: String) -> Result<String, TransportError> {
        let mut chat_history = session.history().to_vec();
        chat_history.push(Turn::user(text.as_str()));

        let request = ChatRequest {
            memory: session.render_memory_context(),
            prompt: START_CHAT_PROMPT.to_string(),
            bot_name: session.bot_name().to_string(),
            user_name: session.user_name().to_string(),
            chat_history,
        };

        let reply = self.transport.send(&request).await?;
        let mut response = reply
            .model_output
            .unwrap_or_else(|| FALLBACK_REPLY.to_string());

        let weirdness = session.weirdness();
        if weirdness > 0.0 {
            response = mangle(&response, weirdness).into_owned();
        }

        session.append_turn(Sender::User, text);
        session.append_turn(Sender::Bot, response.clone());
        Ok(response)
    }
}
