use crate::error::Result;
use crate::http::ApiClient;
use crate::models::{
    Ack, AuthResponse, Credentials, Registration, SettingsReply, SettingsUpdate, User,
};

#[derive(Clone, PartialEq)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn register(&self, registration: &Registration) -> Result<User> {
        let resp: AuthResponse = self.client.post("/register", registration).await?;
        Ok(resp.user)
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<User> {
        let resp: AuthResponse = self.client.post("/login", credentials).await?;
        Ok(resp.user)
    }

    pub async fn logout(&self) -> Result<Ack> {
        self.client.post_empty("/logout").await
    }

    /// Fails with a server error when no session is active.
    pub async fn current_user(&self) -> Result<User> {
        let resp: AuthResponse = self.client.get("/me").await?;
        Ok(resp.user)
    }

    /// The refreshed user, when the server sends one back.
    pub async fn update_settings(&self, update: &SettingsUpdate) -> Result<Option<User>> {
        let resp: SettingsReply = self.client.put("/settings", update).await?;
        Ok(resp.user)
    }

    pub async fn update_password(&self, current: &str, new: &str) -> Result<Ack> {
        let update = SettingsUpdate {
            current_password: Some(current.to_string()),
            new_password: Some(new.to_string()),
            ..Default::default()
        };
        self.client.put("/settings", &update).await
    }
}
