use super::{BuiltinCommand, SecretCommand};

pub struct Command {
    pub name: &'static str,
    pub help: &'static str,
    /// `None` for commands that are advertised but have no handler; those
    /// fall through to the chat.
    pub action: Option<BuiltinCommand>,
}

pub struct Secret {
    pub name: &'static str,
    pub command: SecretCommand,
}

/// Commands shown to the user, in display order.
pub fn documented_commands() -> &'static [Command] {
    COMMANDS
}

/// Look up a built-in that actually has a handler. `name` must already be
/// lower-cased.
pub fn find_builtin(name: &str) -> Option<BuiltinCommand> {
    COMMANDS
        .iter()
        .find(|command| command.name == name)
        .and_then(|command| command.action)
}

pub fn find_secret(name: &str) -> Option<SecretCommand> {
    SECRETS
        .iter()
        .find(|secret| secret.name == name)
        .map(|secret| secret.command)
}

const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        help: "Show available commands",
        action: None,
    },
    Command {
        name: "quit",
        help: "Exit the program",
        action: Some(BuiltinCommand::Quit),
    },
    Command {
        name: "clear",
        help: "Clear the conversation memory",
        action: Some(BuiltinCommand::Clear),
    },
    Command {
        name: "change username",
        help: "Change your username",
        action: Some(BuiltinCommand::ChangeUsername),
    },
    Command {
        name: "status",
        help: "Show bot status",
        action: None,
    },
    Command {
        name: "reset",
        help: "Reset bot state",
        action: None,
    },
];

const SECRETS: &[Secret] = &[
    Secret {
        name: "void",
        command: SecretCommand::EnterVoid,
    },
    Secret {
        name: "chaos",
        command: SecretCommand::IncreaseChaos,
    },
    Secret {
        name: "dream",
        command: SecretCommand::EnterDream,
    },
];
