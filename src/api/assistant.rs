use crate::error::Result;
use crate::http::ApiClient;
use crate::models::{Analysis, ChatReply, ChatRequest, FinancialSnapshot, Health};

pub const DEFAULT_CHAT_CONTEXT: &str = "User is using a personal finance management application";

/// Chat and analysis calls; the backend forwards them to a local language model.
#[derive(Clone, PartialEq)]
pub struct AssistantApi {
    client: ApiClient,
}

impl AssistantApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn chat(&self, message: &str, context: Option<&str>) -> Result<ChatReply> {
        let request = ChatRequest {
            message: message.to_string(),
            context: context.unwrap_or(DEFAULT_CHAT_CONTEXT).to_string(),
        };
        self.client.post("/chat", &request).await
    }

    pub async fn analyze(&self, snapshot: &FinancialSnapshot) -> Result<Analysis> {
        self.client.post("/financial-analysis", snapshot).await
    }

    pub async fn health(&self) -> Result<Health> {
        self.client.get("/health").await
    }
}
