//! Shared helper utilities for gateway integration tests.
//!
//! Integration tests compile as separate crates under `tests/`, so the
//! in-process HTTP simulator standing in for Slack and Harvest lives here.

#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::Mutex;

use actix_web::dev::ServerHandle;
use actix_web::http::Method;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};

/// One request received by the simulator.
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ReceivedRequest {
    /// Header value by lower-case name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Body decoded as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }

    /// Decoded query parameter.
    pub fn query_param(&self, name: &str) -> Option<String> {
        url::form_urlencoded::parse(self.query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

#[derive(Default)]
struct SimulatorState {
    responses: Mutex<HashMap<(Method, String), (u16, String)>>,
    received: Mutex<Vec<ReceivedRequest>>,
}

/// Fluent HTTP simulator answering canned JSON per method and path.
///
/// Responses registered for `path?query` take precedence over those for the
/// bare `path`, which lets paginated endpoints answer per page.
pub struct ApiSimulator {
    base_url: String,
    state: web::Data<SimulatorState>,
    handle: ServerHandle,
}

impl ApiSimulator {
    /// Start a simulator on an ephemeral local port.
    pub fn start() -> Self {
        let state = web::Data::new(SimulatorState::default());
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind simulator listener");
        let addr = listener.local_addr().expect("simulator address");

        let server_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(server_state.clone())
                .default_service(web::to(respond))
        })
        .disable_signals()
        .workers(1)
        .listen(listener)
        .expect("listen on simulator socket")
        .run();

        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://{addr}/"),
            state,
            handle,
        }
    }

    /// Base address with a trailing slash, e.g. `http://127.0.0.1:4242/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Answer `method path` with `status` and a JSON `body`.
    pub fn responds(&self, method: Method, path: &str, status: u16, body: impl Into<String>) {
        self.state
            .responses
            .lock()
            .expect("responses mutex")
            .insert((method, path.to_owned()), (status, body.into()));
    }

    /// Answer `GET path` with 200 and `body`.
    pub fn get(&self, path: &str, body: impl Into<String>) {
        self.responds(Method::GET, path, 200, body);
    }

    /// Answer `POST path` with 200 and `body`.
    pub fn post(&self, path: &str, body: impl Into<String>) {
        self.responds(Method::POST, path, 200, body);
    }

    /// Every request received so far, in arrival order.
    pub fn received_requests(&self) -> Vec<ReceivedRequest> {
        self.state.received.lock().expect("received mutex").clone()
    }

    /// Stop accepting connections.
    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

async fn respond(
    request: HttpRequest,
    body: web::Bytes,
    state: web::Data<SimulatorState>,
) -> HttpResponse {
    let received = ReceivedRequest {
        method: request.method().clone(),
        path: request.path().to_owned(),
        query: request.query_string().to_owned(),
        headers: request
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_ascii_lowercase(), value.to_owned()))
            })
            .collect(),
        body: String::from_utf8_lossy(&body).into_owned(),
    };

    let with_query = format!("{}?{}", received.path, received.query);
    let canned = {
        let responses = state.responses.lock().expect("responses mutex");
        responses
            .get(&(received.method.clone(), with_query))
            .or_else(|| responses.get(&(received.method.clone(), received.path.clone())))
            .cloned()
    };
    state
        .received
        .lock()
        .expect("received mutex")
        .push(received);

    match canned {
        Some((status, body)) => HttpResponse::build(
            actix_web::http::StatusCode::from_u16(status).expect("valid status"),
        )
        .content_type("application/json")
        .body(body),
        None => HttpResponse::NotFound().finish(),
    }
}

/// Address of a local port with nothing listening on it.
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}/")
}
