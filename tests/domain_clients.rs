mod support;

use futures::executor::block_on;
use serde_json::Value;

use finance_dashboard::api::{AssistantApi, AuthApi, BudgetsApi, DEFAULT_CHAT_CONTEXT};
use finance_dashboard::forms::validate_login;
use finance_dashboard::models::{FinancialSnapshot, Registration, SettingsUpdate};
use finance_dashboard::Method;

use support::{client, MockTransport, GROCERIES};

const USER: &str = r#"{"user": {"id": 7, "full_name": "Ada Lovelace", "email": "ada@example.com",
    "currency": "EUR", "notifications": {"budget_alerts": true, "monthly_reports": false,
    "transaction_updates": false, "security_alerts": true}}, "message": "ok"}"#;

fn body(transport: &MockTransport, index: usize) -> Value {
    let sent = transport.sent();
    serde_json::from_str(sent[index].body.as_deref().unwrap()).unwrap()
}

#[test]
fn login_posts_credentials_and_returns_user() {
    let transport = MockTransport::new();
    transport.reply(Method::Post, "/login", 200, USER);
    let api = AuthApi::new(client(&transport));

    let credentials = validate_login(" ada@example.com ", "hunter22").unwrap();
    let user = block_on(api.login(&credentials)).unwrap();
    assert_eq!(user.id, 7);
    assert!(!user.notifications.monthly_reports);
    assert_eq!(body(&transport, 0)["email"], "ada@example.com");
}

#[test]
fn bad_credentials_surface_server_message() {
    let transport = MockTransport::new();
    transport.reply(Method::Post, "/login", 401, r#"{"error":"Invalid email or password"}"#);
    let api = AuthApi::new(client(&transport));

    let credentials = validate_login("ada@example.com", "wrong-pass").unwrap();
    let err = block_on(api.login(&credentials)).unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Invalid email or password");
}

#[test]
fn session_endpoints_use_expected_routes() {
    let transport = MockTransport::new();
    transport.reply(Method::Post, "/register", 201, USER);
    transport.reply(Method::Get, "/me", 200, USER);
    transport.reply(Method::Post, "/logout", 200, r#"{"message":"Logged out successfully"}"#);
    let api = AuthApi::new(client(&transport));

    let registration = Registration {
        full_name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        password: "analytical".to_string(),
    };
    block_on(api.register(&registration)).unwrap();
    block_on(api.current_user()).unwrap();
    let ack = block_on(api.logout()).unwrap();

    assert_eq!(ack.message.as_deref(), Some("Logged out successfully"));
    assert_eq!(transport.sent_lines(), vec!["POST /register", "GET /me", "POST /logout"]);
    assert_eq!(transport.sent()[2].body, None);
}

#[test]
fn settings_update_sends_only_set_fields() {
    let transport = MockTransport::new();
    transport.reply(Method::Put, "/settings", 200, USER);
    transport.reply(Method::Put, "/settings", 200, r#"{"message":"Settings updated successfully"}"#);
    let api = AuthApi::new(client(&transport));

    let update = SettingsUpdate {
        currency: Some("EUR".to_string()),
        ..Default::default()
    };
    let user = block_on(api.update_settings(&update)).unwrap().expect("user in reply");
    assert_eq!(user.currency.as_deref(), Some("EUR"));
    assert_eq!(body(&transport, 0), serde_json::json!({"currency": "EUR"}));

    block_on(api.update_password("old-secret", "new-secret")).unwrap();
    let sent = body(&transport, 1);
    assert_eq!(sent["current_password"], "old-secret");
    assert_eq!(sent["new_password"], "new-secret");
}

#[test]
fn categories_listing_decodes_options() {
    let transport = MockTransport::new();
    transport.reply(
        Method::Get,
        "/categories",
        200,
        r##"[{"name": "Food & Dining", "color": "#0EA5E9"}, {"name": "Transport", "color": "#8B5CF6"}]"##,
    );

    let options = block_on(BudgetsApi::new(client(&transport)).categories()).unwrap();
    let names: Vec<_> = options.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["Food & Dining", "Transport"]);
}

#[test]
fn chat_falls_back_to_default_context() {
    let transport = MockTransport::new();
    transport.reply(Method::Post, "/chat", 200, r#"{"response": "Spend less on coffee.", "model": "llama3"}"#);
    transport.reply(Method::Post, "/chat", 200, r#"{"response": "Sure."}"#);
    let api = AssistantApi::new(client(&transport));

    let reply = block_on(api.chat("How am I doing?", None)).unwrap();
    assert_eq!(reply.response, "Spend less on coffee.");
    assert_eq!(body(&transport, 0)["context"], DEFAULT_CHAT_CONTEXT);

    block_on(api.chat("And now?", Some("budgets page"))).unwrap();
    assert_eq!(body(&transport, 1)["context"], "budgets page");
}

#[test]
fn analysis_sends_snapshot_totals() {
    let transport = MockTransport::new();
    transport.reply(
        Method::Post,
        "/financial-analysis",
        200,
        r#"{"analysis": "Looks fine.", "summary": {"income": 0, "expenses": 42.5, "net": -42.5, "transaction_count": 1}}"#,
    );
    let api = AssistantApi::new(client(&transport));

    let tx = serde_json::from_str(GROCERIES).unwrap();
    let snapshot = FinancialSnapshot::from_transactions(vec![tx], None);
    let analysis = block_on(api.analyze(&snapshot)).unwrap();

    assert_eq!(analysis.analysis, "Looks fine.");
    assert_eq!(analysis.summary.transaction_count, 1);
    let sent = body(&transport, 0);
    assert_eq!(sent["expenses"].as_f64(), Some(42.5));
    assert_eq!(sent["transactions"].as_array().map(Vec::len), Some(1));
}

#[test]
fn health_reports_model_availability() {
    let transport = MockTransport::new();
    transport.reply(
        Method::Get,
        "/health",
        200,
        r#"{"status": "healthy", "ollama_available": false}"#,
    );

    let health = block_on(AssistantApi::new(client(&transport)).health()).unwrap();
    assert!(health.is_healthy());
    assert!(!health.ollama_available);
    assert_eq!(health.model, None);
}

#[test]
fn settings_acknowledgement_without_user_is_success() {
    let transport = MockTransport::new();
    transport.reply(Method::Put, "/settings", 200, r#"{"message":"Settings updated successfully"}"#);
    let api = AuthApi::new(client(&transport));

    let update = SettingsUpdate {
        full_name: Some("Ada King".to_string()),
        ..Default::default()
    };
    assert_eq!(block_on(api.update_settings(&update)).unwrap(), None);
}
