//! Push gateway doubles.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::PushMessage;
use crate::error::{Error, Result};
use crate::port::PushGateway;

/// Thread-safe message collector for push assertions in tests.
#[derive(Clone, Default)]
pub struct RecordingPush {
    messages: Arc<Mutex<Vec<PushMessage>>>,
}

impl RecordingPush {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<PushMessage> {
        self.messages.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

#[async_trait]
impl PushGateway for RecordingPush {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn publish(&self, message: &PushMessage) -> Result<String> {
        let mut messages = self.messages.lock();
        messages.push(message.clone());
        Ok(format!("projects/test/messages/{}", messages.len()))
    }
}

/// Gateway whose every publish fails.
pub struct FailingPush;

#[async_trait]
impl PushGateway for FailingPush {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn publish(&self, _message: &PushMessage) -> Result<String> {
        Err(Error::Push("gateway unavailable".into()))
    }
}
