use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::api::{ChatReply, ChatRequest};
use crate::core::transport::{Transport, TransportError};

pub enum ScriptedReply {
    Reply(ChatReply),
    Failure(String),
}

impl ScriptedReply {
    pub fn output(text: &str) -> Self {
        ScriptedReply::Reply(ChatReply {
            model_output: Some(text.to_string()),
        })
    }

    /// The endpoint answered `{}`.
    pub fn empty() -> Self {
        ScriptedReply::Reply(ChatReply::default())
    }

    pub fn failure(message: &str) -> Self {
        ScriptedReply::Failure(message.to_string())
    }
}

#[derive(Default)]
struct ScriptState {
    replies: VecDeque<ScriptedReply>,
    requests: Vec<ChatRequest>,
}

/// Transport that answers from a fixed script and records every request.
/// Clones share the same script.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ScriptState {
                replies: replies.into(),
                requests: Vec::new(),
            })),
        }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.state.lock().unwrap().requests.clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());
        match state.replies.pop_front() {
            Some(ScriptedReply::Reply(reply)) => Ok(reply),
            Some(ScriptedReply::Failure(message)) => Err(TransportError::Status {
                status: StatusCode::BAD_GATEWAY,
                body: message,
            }),
            None => panic!("scripted transport ran out of replies"),
        }
    }
}

/// Transport whose requests never complete. Counts how many were started.
#[derive(Clone, Default)]
pub struct StalledTransport {
    started: Arc<AtomicUsize>,
}

impl StalledTransport {
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for StalledTransport {
    async fn send(&self, _request: &ChatRequest) -> Result<ChatReply, TransportError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}
