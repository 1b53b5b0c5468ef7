use crate::error::Result;
use crate::http::ApiClient;
use crate::models::DashboardStats;

#[derive(Clone, PartialEq)]
pub struct DashboardApi {
    client: ApiClient,
}

impl DashboardApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        self.client.get("/dashboard-stats").await
    }
}
