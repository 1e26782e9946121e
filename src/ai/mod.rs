pub mod analysis;
pub mod client;
pub mod inference;
pub mod refine;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::ConfigError;

pub use analysis::CommentAnalyst;
pub use client::OpenAiClient;
pub use refine::Refiner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    Json,
    Text,
}

#[derive(Debug, Clone)]
pub struct Prompt {
    pub system: String,
    pub user: String,
    pub mode: ResponseMode,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("language model request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("language model response did not contain any content")]
    EmptyResponse,
}

#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: Prompt) -> Result<String, LlmError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    use super::*;

    pub struct ScriptedModel {
        reply: Result<String, fn() -> LlmError>,
        pub calls: AtomicUsize,
        pub prompts: Mutex<Vec<Prompt>>,
    }

    impl ScriptedModel {
        pub fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(err: fn() -> LlmError) -> Self {
            Self {
                reply: Err(err),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LanguageModel for ScriptedModel {
        async fn complete(&self, prompt: Prompt) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt);
            match &self.reply {
                Ok(reply) => Ok(reply.clone()),
                Err(make) => Err(make()),
            }
        }
    }
}
