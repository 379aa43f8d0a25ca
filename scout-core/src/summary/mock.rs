//! Mock generator for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::traits::TextGenerator;
use crate::Result;

/// Mock generator that answers every prompt with the same result.
#[derive(Clone)]
pub struct MockGenerator {
    response: Arc<Result<String>>,
    call_count: Arc<AtomicUsize>,
    prompts: Arc<std::sync::Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockGenerator {
    pub fn returning(text: impl Into<String>) -> Self {
        Self::with_result(Ok(text.into()))
    }

    pub fn failing(err: crate::ExplorerError) -> Self {
        Self::with_result(Err(err))
    }

    fn with_result(response: Result<String>) -> Self {
        Self {
            response: Arc::new(response),
            call_count: Arc::new(AtomicUsize::new(0)),
            prompts: Arc::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        (*self.response).clone()
    }
}
