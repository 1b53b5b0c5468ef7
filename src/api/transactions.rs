use crate::error::Result;
use crate::http::ApiClient;
use crate::models::{Ack, NewTransaction, Transaction, TransactionPatch};

/// No validation happens here; callers run drafts through `forms` first.
#[derive(Clone, PartialEq)]
pub struct TransactionsApi {
    client: ApiClient,
}

impl TransactionsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Transaction>> {
        self.client.get("/transactions").await
    }

    pub async fn create(&self, tx: &NewTransaction) -> Result<Transaction> {
        self.client.post("/transactions", tx).await
    }

    pub async fn update(&self, id: i64, patch: &TransactionPatch) -> Result<Transaction> {
        self.client.put(&format!("/transactions/{id}"), patch).await
    }

    pub async fn delete(&self, id: i64) -> Result<Ack> {
        self.client.delete(&format!("/transactions/{id}")).await
    }
}
