use crate::error::Result;
use crate::http::ApiClient;
use crate::models::{Ack, Budget, CategoryInput, CategoryOption, CategoryPatch};

#[derive(Clone, PartialEq)]
pub struct BudgetsApi {
    client: ApiClient,
}

impl BudgetsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Budget>> {
        self.client.get("/budgets").await
    }

    /// Name and colour only, for pickers.
    pub async fn categories(&self) -> Result<Vec<CategoryOption>> {
        self.client.get("/categories").await
    }

    pub async fn create(&self, input: &CategoryInput) -> Result<Budget> {
        self.client.post("/budgets", input).await
    }

    pub async fn update(&self, id: i64, patch: &CategoryPatch) -> Result<Budget> {
        self.client.put(&format!("/budgets/{id}"), patch).await
    }

    pub async fn delete(&self, id: i64) -> Result<Ack> {
        self.client.delete(&format!("/budgets/{id}")).await
    }
}
