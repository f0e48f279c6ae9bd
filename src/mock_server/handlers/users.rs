//! User endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::mock_server::state::{MockState, PANEL_DEFAULT_PER_PAGE};
use crate::{ItemEnvelope, ListEnvelope, ListMeta, User, LIST_OBJECT};

/// Query parameters for listing users.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Panel-style error body: `{"errors": [{"code", "status", "detail"}]}`.
fn error_response(status: StatusCode, code: &str, detail: String) -> Response {
    (
        status,
        Json(serde_json::json!({
            "errors": [{
                "code": code,
                "status": status.as_u16().to_string(),
                "detail": detail
            }]
        })),
    )
        .into_response()
}

/// Record the request and apply auth / forced failures.
fn gate(state: &mut MockState, headers: &HeaderMap, uri: &Uri) -> Option<Response> {
    state.requests.push(uri.to_string());

    if let Some(status) = state.forced_status {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return Some(error_response(
            status,
            "HttpException",
            "forced failure".to_string(),
        ));
    }

    let authorization = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if !state.is_authorized(authorization) {
        return Some(error_response(
            StatusCode::UNAUTHORIZED,
            "AuthenticationException",
            "Unauthenticated.".to_string(),
        ));
    }

    None
}

/// GET /api/application/users
pub async fn list_users(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    uri: Uri,
    Query(query): Query<ListUsersQuery>,
) -> Response {
    let mut state = state.write().await;
    if let Some(rejection) = gate(&mut state, &headers, &uri) {
        return rejection;
    }

    let (users, pagination) = state.list_users(
        query.page.unwrap_or(1),
        query.per_page.unwrap_or(PANEL_DEFAULT_PER_PAGE),
    );

    let envelope = ListEnvelope {
        object: LIST_OBJECT.to_string(),
        data: users
            .into_iter()
            .map(|attributes| ItemEnvelope {
                object: "user".to_string(),
                attributes,
            })
            .collect(),
        meta: ListMeta { pagination },
    };

    (StatusCode::OK, Json(envelope)).into_response()
}

/// GET /api/application/users/{id}
pub async fn get_user(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    uri: Uri,
    Path(id): Path<u64>,
) -> Response {
    let mut state = state.write().await;
    if let Some(rejection) = gate(&mut state, &headers, &uri) {
        return rejection;
    }

    match state.get_user(id) {
        Some(user) => (
            StatusCode::OK,
            Json(ItemEnvelope::<User> {
                object: "user".to_string(),
                attributes: user.clone(),
            }),
        )
            .into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            "NotFoundHttpException",
            format!("The requested resource could not be found on the server: user {id}"),
        ),
    }
}
