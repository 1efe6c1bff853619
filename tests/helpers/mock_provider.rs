// ABOUTME: Scripted LLM provider for exercising plan generation without network access
// ABOUTME: Replays canned replies or failures and records the requests it receives
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fitplan_server::errors::{AppError, ErrorCode};
use fitplan_server::llm::{ChatRequest, ChatResponse, LlmProvider};

/// What the scripted provider answers with
#[derive(Debug, Clone)]
pub enum Script {
    /// Reply with this text
    Reply(String),
    /// Fail with this error code
    Fail(ErrorCode),
}

/// Provider that answers every request from its script
pub struct ScriptedProvider {
    script: Script,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    pub fn replying(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            script: Script::Reply(text.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(code: ErrorCode) -> Arc<Self> {
        Arc::new(Self {
            script: Script::Fail(code),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Requests received so far
    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.script {
            Script::Reply(text) => Ok(ChatResponse {
                content: text.clone(),
                model: "scripted-model".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            }),
            Script::Fail(code) => Err(AppError::new(*code, "scripted failure")),
        }
    }
}
