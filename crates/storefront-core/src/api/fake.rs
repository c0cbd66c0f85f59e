#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::transport::{RequestEnvelope, Transport, TransportResponse};
use super::ApiError;

/// Transport double that records every envelope and replays queued outcomes
#[derive(Clone, Default)]
pub struct FakeTransport {
    pub requests: Arc<Mutex<Vec<RequestEnvelope>>>,
    outcomes: Arc<Mutex<VecDeque<Result<TransportResponse, ApiError>>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.outcomes.lock().unwrap().push_back(Ok(TransportResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn fail_network(&self, message: &str) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Err(ApiError::Network(message.to_string())));
    }

    pub fn last_request(&self) -> Option<RequestEnvelope> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, envelope: RequestEnvelope) -> Result<TransportResponse, ApiError> {
        self.requests.lock().unwrap().push(envelope);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no response queued".to_string())))
    }
}
