//! Classification of input lines.
//!
//! Every line is exactly one of: a secret command (hidden, mutates the
//! session), a built-in command (handled by the engine), or free text for the
//! chat. Matching lower-cases the whole line and compares it exactly; no
//! whitespace is trimmed, so `" void"` is free text.

mod registry;

pub use registry::{documented_commands, Command};

use crate::core::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretCommand {
    EnterVoid,
    IncreaseChaos,
    EnterDream,
}

impl SecretCommand {
    /// Run the mutator and return its status line.
    pub fn apply(self, session: &mut Session) -> String {
        match self {
            SecretCommand::EnterVoid => session.enter_void_mode(),
            SecretCommand::IncreaseChaos => session.increase_chaos(),
            SecretCommand::EnterDream => session.enter_dream_mode(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinCommand {
    Quit,
    Clear,
    ChangeUsername,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Secret(SecretCommand),
    Builtin(BuiltinCommand),
    FreeText(String),
}

pub fn classify(line: &str) -> Classification {
    let normalized = line.to_lowercase();

    if let Some(secret) = registry::find_secret(&normalized) {
        return Classification::Secret(secret);
    }

    if let Some(builtin) = registry::find_builtin(&normalized) {
        return Classification::Builtin(builtin);
    }

    Classification::FreeText(line.to_string())
}
