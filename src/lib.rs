//! Glitchat is a line-mode terminal chatbot client for a single HTTP chat
//! endpoint, with a personality that can be pushed into stranger territory.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the session state, the glitch text effect, configuration,
//!   the HTTP transport, and the conversation engine that ties them together.
//! - [`commands`] classifies input lines into secret commands, built-ins, or
//!   free text, and holds the command registry shown to the user.
//! - [`ui`] renders panels and runs the interactive loop.
//! - [`api`] defines the JSON payloads exchanged with the chat endpoint.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which loads configuration and hands off to
//! [`ui::chat_loop`].

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
