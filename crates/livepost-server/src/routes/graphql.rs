//! GraphQL endpoint: POST executes, GET upgrades to a subscription socket.

use std::net::SocketAddr;

use async_graphql::http::{GraphiQLSource, ALL_WEBSOCKET_PROTOCOLS};
use async_graphql::Data;
use async_graphql_axum::{GraphQLProtocol, GraphQLWebSocket};
use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State, WebSocketUpgrade},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::context::RequestContext;
use crate::error::{Result, ServerError};
use crate::state::AppState;

pub fn routes(endpoint: &str) -> Router<AppState> {
    Router::new().route(endpoint, get(handle_get).post(handle_post))
}

/// Execute a query or mutation.
async fn handle_post(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: std::result::Result<Json<async_graphql::Request>, JsonRejection>,
) -> Result<Json<async_graphql::Response>> {
    let Json(request) =
        body.map_err(|rejection| ServerError::Transport(rejection.body_text()))?;

    let context = RequestContext::http(connect_info.map(|ConnectInfo(addr)| addr), &headers);
    tracing::debug!(
        request_id = %context.request_id,
        operation = ?request.operation_name,
        "executing graphql request"
    );

    let response = state.schema.execute(request.data(context)).await;
    Ok(Json(response))
}

/// Upgrade to a GraphQL WebSocket, or serve GraphiQL to a browser.
async fn handle_get(
    State(state): State<AppState>,
    upgrade: Option<WebSocketUpgrade>,
    protocol: Option<GraphQLProtocol>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> Result<Response> {
    let Some(upgrade) = upgrade else {
        if !state.config.playground {
            return Err(ServerError::Transport(
                "expected a websocket upgrade request".to_string(),
            ));
        }
        return Ok(playground(&state.config.endpoint).into_response());
    };

    let protocol = protocol.ok_or_else(|| {
        ServerError::Transport(format!(
            "unsupported websocket subprotocol, expected one of: {}",
            ALL_WEBSOCKET_PROTOCOLS.join(", ")
        ))
    })?;

    let context = RequestContext::websocket(connect_info.map(|ConnectInfo(addr)| addr), &headers);
    let schema = state.schema.clone();

    Ok(upgrade
        .protocols(ALL_WEBSOCKET_PROTOCOLS)
        .on_upgrade(move |socket| async move {
            let request_id = context.request_id;
            tracing::info!(%request_id, peer = ?context.peer, "subscription connection opened");

            GraphQLWebSocket::new(socket, schema, protocol)
                .on_connection_init(move |params| async move {
                    let mut data = Data::default();
                    data.insert(context.with_connection_params(params));
                    Ok(data)
                })
                .serve()
                .await;

            tracing::info!(%request_id, "subscription connection closed");
        }))
}

fn playground(endpoint: &str) -> Html<String> {
    Html(
        GraphiQLSource::build()
            .endpoint(endpoint)
            .subscription_endpoint(endpoint)
            .finish(),
    )
}
