pub mod config;
pub mod engine;
pub mod glitch;
pub mod message;
pub mod session;
pub mod text_wrapping;
pub mod transport;
