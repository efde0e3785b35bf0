//! Terminal output and the interactive loop.
//!
//! - [`chat_loop`]: reads input lines, dispatches them through the
//!   conversation engine and shows the results.
//! - [`panel`]: bordered panels and styled lines written to any `Write` sink.
//! - [`theme`]: colours per display style.
//!
//! Ownership boundary: this layer presents and captures interaction state,
//! while [`crate::core`] owns domain logic and the endpoint.

pub mod chat_loop;
pub mod panel;
pub mod theme;
