//! Per-request context handed to GraphQL resolvers.

use std::net::SocketAddr;

use axum::http::{header, HeaderMap};
use uuid::Uuid;

/// How a request reached the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Single query or mutation over HTTP POST.
    Http,
    /// Operation running on a WebSocket subscription connection.
    WebSocket,
}

/// Metadata about the client behind one operation (HTTP) or one connection
/// (WebSocket). Resolvers read it with `ctx.data_opt::<RequestContext>()`.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: Uuid,
    pub transport: TransportKind,
    pub peer: Option<SocketAddr>,
    pub user_agent: Option<String>,
    /// Payload of the client's `connection_init` message, WebSocket only.
    pub connection_params: Option<serde_json::Value>,
}

impl RequestContext {
    pub fn http(peer: Option<SocketAddr>, headers: &HeaderMap) -> Self {
        Self::new(TransportKind::Http, peer, headers)
    }

    pub fn websocket(peer: Option<SocketAddr>, headers: &HeaderMap) -> Self {
        Self::new(TransportKind::WebSocket, peer, headers)
    }

    fn new(transport: TransportKind, peer: Option<SocketAddr>, headers: &HeaderMap) -> Self {
        let user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Self {
            request_id: Uuid::new_v4(),
            transport,
            peer,
            user_agent,
            connection_params: None,
        }
    }

    pub fn with_connection_params(mut self, params: serde_json::Value) -> Self {
        if !params.is_null() {
            self.connection_params = Some(params);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_http_context_reads_user_agent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static("curl/8.0"));

        let ctx = RequestContext::http(None, &headers);
        assert_eq!(ctx.transport, TransportKind::Http);
        assert_eq!(ctx.user_agent.as_deref(), Some("curl/8.0"));
        assert!(ctx.connection_params.is_none());
    }

    #[test]
    fn test_request_ids_are_unique() {
        let headers = HeaderMap::new();
        let a = RequestContext::http(None, &headers);
        let b = RequestContext::http(None, &headers);
        assert_ne!(a.request_id, b.request_id);
    }

    #[test]
    fn test_connection_params_ignore_null() {
        let headers = HeaderMap::new();
        let ctx = RequestContext::websocket(None, &headers).with_connection_params(serde_json::Value::Null);
        assert!(ctx.connection_params.is_none());

        let ctx = RequestContext::websocket(None, &headers)
            .with_connection_params(serde_json::json!({"client": "demo"}));
        assert_eq!(ctx.transport, TransportKind::WebSocket);
        assert_eq!(ctx.connection_params, Some(serde_json::json!({"client": "demo"})));
    }
}
