//! Scripted transport for client tests

use crate::http::{HttpResponse, PageFetcher, SessionCookie};
use crate::SourceError;
use async_trait::async_trait;
use std::sync::Mutex;

enum Reply {
    Response(HttpResponse),
    Unreachable,
}

/// Answers GETs from a table of URL prefixes (longest prefix wins) and
/// records every requested URL. Unknown URLs get a 404.
#[derive(Default)]
pub struct ScriptedFetcher {
    routes: Mutex<Vec<(String, Reply)>>,
    requests: Mutex<Vec<String>>,
    cookies: Mutex<Vec<Option<SessionCookie>>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, prefix: &str, response: HttpResponse) {
        self.set(prefix, Reply::Response(response));
    }

    pub fn respond_ok(&self, prefix: &str, body: &str) {
        self.respond(prefix, HttpResponse::ok(body));
    }

    /// Simulate a connection failure for this prefix
    pub fn unreachable(&self, prefix: &str) {
        self.set(prefix, Reply::Unreachable);
    }

    fn set(&self, prefix: &str, reply: Reply) {
        let mut routes = self.routes.lock().unwrap();
        routes.retain(|(p, _)| p != prefix);
        routes.push((prefix.to_string(), reply));
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, prefix: &str) -> usize {
        self.requests().iter().filter(|u| u.starts_with(prefix)).count()
    }

    pub fn last_cookie(&self) -> Option<SessionCookie> {
        self.cookies.lock().unwrap().last().cloned().flatten()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn get(&self, url: &str, cookie: Option<&SessionCookie>) -> Result<HttpResponse, SourceError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.cookies.lock().unwrap().push(cookie.cloned());

        let routes = self.routes.lock().unwrap();
        let reply = routes
            .iter()
            .filter(|(prefix, _)| url.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, reply)| reply);

        match reply {
            Some(Reply::Response(response)) => Ok(response.clone()),
            Some(Reply::Unreachable) => Err(SourceError::Request {
                url: url.to_string(),
                message: "connection refused".to_string(),
            }),
            None => Ok(HttpResponse::with_status(404)),
        }
    }
}
