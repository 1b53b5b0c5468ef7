mod support;

use std::io;
use std::sync::{Arc, Mutex};

use futures::executor::block_on;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use finance_dashboard::api::TransactionsApi;
use finance_dashboard::models::Transaction;
use finance_dashboard::{ApiError, Interest, Method};

use support::{client, MockTransport, GROCERIES};

#[test]
fn server_error_field_is_surfaced() {
    let transport = MockTransport::new();
    transport.reply(Method::Get, "/transactions", 500, r#"{"error":"db down"}"#);

    let err = block_on(TransactionsApi::new(client(&transport)).list()).unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "db down");
}

#[test]
fn unparseable_error_body_falls_back_to_status_line() {
    let transport = MockTransport::new();
    transport.reply(Method::Get, "/transactions", 500, "<html>oops</html>");

    let err = block_on(TransactionsApi::new(client(&transport)).list()).unwrap_err();
    assert_eq!(err.to_string(), "API Error: 500 Internal Server Error");
}

#[test]
fn transport_failure_is_a_network_error() {
    let transport = MockTransport::new();
    transport.fail(Method::Get, "/transactions", "Failed to fetch");

    let err = block_on(TransactionsApi::new(client(&transport)).list()).unwrap_err();
    assert_eq!(err, ApiError::Network("Failed to fetch".to_string()));
    assert_eq!(err.status(), None);
}

#[test]
fn malformed_success_body_is_a_decode_error() {
    let transport = MockTransport::new();
    transport.reply(Method::Get, "/transactions", 200, r#"{"items": []}"#);

    let err = block_on(TransactionsApi::new(client(&transport)).list()).unwrap_err();
    match err {
        ApiError::Decode { endpoint, .. } => assert_eq!(endpoint, "/transactions"),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[test]
fn successful_list_decodes_rows() {
    let transport = MockTransport::new();
    transport.reply(Method::Get, "/transactions", 200, &format!("[{GROCERIES}]"));

    let list: Vec<Transaction> = block_on(TransactionsApi::new(client(&transport)).list()).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].title, "Groceries");
    assert_eq!(transport.sent()[0].url, "http://test.local/api/transactions");
    assert_eq!(transport.sent()[0].body, None);
}

#[test]
fn withdrawn_interest_sends_nothing() {
    let transport = MockTransport::new();
    let interest = Interest::new();
    interest.withdraw();

    let api = TransactionsApi::new(client(&transport).with_interest(&interest));
    let err = block_on(api.list()).unwrap_err();
    assert!(err.is_cancelled());
    assert!(transport.sent().is_empty());
}

#[test]
fn response_arriving_after_withdrawal_is_discarded() {
    let transport = MockTransport::new();
    transport.reply(Method::Get, "/transactions", 200, &format!("[{GROCERIES}]"));
    let interest = Interest::new();
    transport.withdraw_during_send(&interest);

    let api = TransactionsApi::new(client(&transport).with_interest(&interest));
    let err = block_on(api.list()).unwrap_err();
    assert_eq!(err, ApiError::Cancelled);
    assert_eq!(transport.sent().len(), 1);
}

#[test]
fn client_headers_reach_the_transport() {
    let transport = MockTransport::new();
    transport.reply(Method::Get, "/transactions", 200, "[]");
    transport.reply(Method::Get, "/transactions", 200, "[]");
    let base = client(&transport).with_header("X-Client", "dashboard");

    block_on(TransactionsApi::new(base.clone()).list()).unwrap();
    block_on(TransactionsApi::new(base.with_interest(&Interest::new())).list()).unwrap();

    let expected = vec![("X-Client".to_string(), "dashboard".to_string())];
    let sent = transport.sent();
    assert_eq!(sent[0].headers, expected);
    assert_eq!(sent[1].headers, expected);
}

#[test]
fn plain_client_sends_no_extra_headers() {
    let transport = MockTransport::new();
    transport.reply(Method::Get, "/transactions", 200, "[]");

    block_on(TransactionsApi::new(client(&transport)).list()).unwrap();
    assert!(transport.sent()[0].headers.is_empty());
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter(Arc::clone(&self.0))
    }
}

impl io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "lock poisoned"))?;
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn captured(sink: &SharedBuffer) -> String {
    let bytes = sink.0.lock().expect("lock output").clone();
    String::from_utf8(bytes).expect("utf8 log output")
}

#[test]
fn failed_request_is_logged_with_endpoint() {
    let transport = MockTransport::new();
    transport.reply(Method::Get, "/transactions", 500, r#"{"error":"db down"}"#);
    let sink = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .with_ansi(false)
        .without_time()
        .with_max_level(Level::DEBUG)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let _ = block_on(TransactionsApi::new(client(&transport)).list());
    });

    let text = captured(&sink);
    let line = text
        .lines()
        .find(|l| l.contains("API request failed"))
        .expect("error line");
    assert!(line.contains("ERROR"));
    assert!(line.contains("/transactions"));
    assert!(line.contains("db down"));
}

#[test]
fn cancelled_request_is_not_logged_as_error() {
    let transport = MockTransport::new();
    let interest = Interest::new();
    interest.withdraw();
    let sink = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .with_ansi(false)
        .without_time()
        .with_max_level(Level::DEBUG)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let api = TransactionsApi::new(client(&transport).with_interest(&interest));
        let _ = block_on(api.list());
    });

    let text = captured(&sink);
    assert!(!text.contains("API request failed"));
    assert!(text.contains("caller withdrew"));
}
