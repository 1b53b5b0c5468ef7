#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use finance_dashboard::{
    ApiClient, ApiError, AppConfig, HttpRequest, HttpResponse, Interest, Method, Result, Transport,
};

pub const BASE: &str = "http://test.local/api";

/// Scripted transport: replies are queued per `"METHOD /path"` and every request is recorded.
#[derive(Default)]
pub struct MockTransport {
    routes: RefCell<HashMap<String, VecDeque<Result<HttpResponse>>>>,
    sent: RefCell<Vec<HttpRequest>>,
    withdraw_on_send: RefCell<Option<Interest>>,
}

impl MockTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn reply(&self, method: Method, path: &str, status: u16, body: &str) {
        let status_text = match status {
            200 => "OK",
            201 => "Created",
            400 => "Bad Request",
            401 => "Unauthorized",
            404 => "Not Found",
            500 => "Internal Server Error",
            _ => "",
        };
        self.push(
            method,
            path,
            Ok(HttpResponse {
                status,
                status_text: status_text.to_string(),
                body: body.to_string(),
            }),
        );
    }

    pub fn fail(&self, method: Method, path: &str, reason: &str) {
        self.push(method, path, Err(ApiError::Network(reason.to_string())));
    }

    /// Withdraws `interest` while the next request is in flight.
    pub fn withdraw_during_send(&self, interest: &Interest) {
        *self.withdraw_on_send.borrow_mut() = Some(interest.clone());
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }

    pub fn sent_lines(&self) -> Vec<String> {
        self.sent
            .borrow()
            .iter()
            .map(|r| format!("{} {}", r.method, r.url.trim_start_matches(BASE)))
            .collect()
    }

    fn push(&self, method: Method, path: &str, reply: Result<HttpResponse>) {
        self.routes
            .borrow_mut()
            .entry(format!("{} {}", method, path))
            .or_default()
            .push_back(reply);
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let key = format!("{} {}", request.method, request.url.trim_start_matches(BASE));
        self.sent.borrow_mut().push(request);
        if let Some(interest) = self.withdraw_on_send.borrow_mut().take() {
            interest.withdraw();
        }
        self.routes
            .borrow_mut()
            .get_mut(&key)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(ApiError::Network(format!("no scripted reply for {}", key))))
    }
}

pub fn client(transport: &Rc<MockTransport>) -> ApiClient {
    let transport: Rc<dyn Transport> = transport.clone();
    ApiClient::new(AppConfig::new(BASE), transport)
}

pub const GROCERIES: &str = r#"{
    "id": 1, "date": "2024-03-01", "title": "Groceries", "type": "expense",
    "amount": 42.5, "category": "Food & Dining", "notes": null
}"#;

pub const SALARY: &str = r#"{
    "id": 2, "date": "2024-03-02", "title": "Salary", "type": "income",
    "amount": 3000, "category": "Salary", "notes": "March"
}"#;

pub const BUDGETS: &str = r##"[
    {"id": 1, "name": "Food & Dining", "budgetLimit": 500, "spent": 420, "income": 0,
     "remaining": 80, "color": "#0EA5E9", "period": "Monthly"},
    {"id": 2, "name": "Transport", "budgetLimit": 150, "spent": 180, "income": 0,
     "remaining": -30, "color": "#8B5CF6", "period": "Monthly"}
]"##;
