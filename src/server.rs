//! Relic REST API
//!
//! JSON bodies throughout. Failures carry a stable `error` label and a
//! `details` message; the status code follows the error taxonomy.
//! Bodies are read as raw JSON values so shape errors surface as this
//! crate's 422 envelope rather than the framework's.

use axum::{
    extract::Query,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{Result, StoreError};
use crate::model::{DeletedItem, Resource, ResourceType};
use crate::{auth, protected, resources, types};

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    details: String,
}

#[derive(Debug, Serialize)]
struct MessageResponse<T> {
    message: String,
    data: T,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    message: String,
    token: String,
}

#[derive(Debug, Serialize)]
struct LogoutResponse {
    message: String,
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match self {
            StoreError::Authentication(_) => StatusCode::UNAUTHORIZED,
            StoreError::Permission(_) => StatusCode::FORBIDDEN,
            StoreError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Conflict(_) => StatusCode::CONFLICT,
            StoreError::Storage(_) => StatusCode::BAD_GATEWAY,
        };
        let body = ErrorBody {
            error: self.label().to_string(),
            details: self.message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Extract the bearer token from the Authorization header
fn bearer(headers: &HeaderMap) -> Result<String> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| StoreError::Authentication("missing bearer token".into()))?;
    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| StoreError::Authentication("malformed authorization header".into()))?;
    Ok(token.to_string())
}

fn body_object(body: &Value) -> Result<&serde_json::Map<String, Value>> {
    body.as_object()
        .ok_or_else(|| StoreError::Validation("request body must be a JSON object".into()))
}

fn string_field<'a>(obj: &'a serde_json::Map<String, Value>, name: &str) -> Result<&'a str> {
    obj.get(name)
        .ok_or_else(|| StoreError::Validation(format!("{} is mandatory", name)))?
        .as_str()
        .ok_or_else(|| StoreError::Validation(format!("{} must be a string", name)))
}

/// Coerce a JSON integer or numeric string to an identifier
fn coerce_id(value: &Value) -> Result<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| StoreError::Validation("identifier must be a positive integer".into())),
        Value::String(s) => s.trim().parse().map_err(|_| {
            StoreError::Validation(format!("'{}' is not a valid identifier", s))
        }),
        _ => Err(StoreError::Validation(
            "identifier must be an integer or a numeric string".into(),
        )),
    }
}

/// Coerce a query-string identifier; empty and missing values are rejected
fn parse_query_id(raw: Option<&str>) -> Result<u64> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| StoreError::Validation("resourcetype_id is mandatory".into()))?;
    raw.parse()
        .map_err(|_| StoreError::Validation(format!("'{}' is not a valid identifier", raw)))
}

// ============================================================================
// Handlers
// ============================================================================

#[derive(Debug, Deserialize)]
struct ListQuery {
    resource_type: Option<String>,
}

async fn list_types(Query(q): Query<ListQuery>) -> Result<Json<Vec<ResourceType>>> {
    let list = types::list_resource_types(q.resource_type.as_deref())?;
    if q.resource_type.is_some() && list.is_empty() {
        return Err(StoreError::NotFound(
            "no resource type matches the requested filter".into(),
        ));
    }
    Ok(Json(list))
}

async fn create_type(
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<MessageResponse<ResourceType>>)> {
    let (email, role) = auth::current_user(&bearer(&headers)?)?;
    let name = string_field(body_object(&body)?, "resourceType")?;
    let rt = protected::create_resource_type(&email, role, name)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Resource type created successfully".into(),
            data: rt,
        }),
    ))
}

#[derive(Debug, Deserialize)]
struct DeleteQuery {
    resourcetype_id: Option<String>,
}

async fn delete_type(
    headers: HeaderMap,
    Query(q): Query<DeleteQuery>,
) -> Result<Json<MessageResponse<DeletedItem>>> {
    let (email, role) = auth::current_user(&bearer(&headers)?)?;
    let id = parse_query_id(q.resourcetype_id.as_deref())?;
    let item = protected::delete_resource_type(&email, role, id)?;
    Ok(Json(MessageResponse {
        message: format!("ResourceType with identity {} deleted successfully", id),
        data: item,
    }))
}

async fn restore_deleted(
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<MessageResponse<ResourceType>>)> {
    let (email, role) = auth::current_user(&bearer(&headers)?)?;
    let obj = body_object(&body)?;
    let item_id = coerce_id(
        obj.get("itemId")
            .ok_or_else(|| StoreError::Validation("itemId is mandatory".into()))?,
    )?;
    let record = protected::restore_deleted_item(&email, role, item_id)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("Deleted Item with identity {} restored successfully", item_id),
            data: record,
        }),
    ))
}

async fn create_resource(
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<MessageResponse<Resource>>)> {
    auth::current_user(&bearer(&headers)?)?;
    let obj = body_object(&body)?;
    let resource_type = string_field(obj, "resourceType")?;
    let language = string_field(obj, "language")?;
    let version = string_field(obj, "version")?;
    let year = match obj.get("year") {
        Some(v) => coerce_id(v)?,
        None => 0,
    };
    let r = resources::create_resource(resource_type, language, version, year)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Resource created successfully".into(),
            data: r,
        }),
    ))
}

async fn login(Json(body): Json<Value>) -> Result<Json<LoginResponse>> {
    let obj = body_object(&body)?;
    let email = string_field(obj, "user_email")?;
    let password = string_field(obj, "password")?;
    let token = auth::login(email, password)?;
    Ok(Json(LoginResponse {
        message: "Login Succesfull".into(),
        token,
    }))
}

async fn logout(headers: HeaderMap) -> Result<Json<LogoutResponse>> {
    let token = bearer(&headers)?;
    if !auth::logout(&token)? {
        return Err(StoreError::Authentication("invalid token".into()));
    }
    Ok(Json(LogoutResponse {
        message: "Successfully logged out".into(),
    }))
}

// ============================================================================
// Router
// ============================================================================

/// Build the API router
pub fn router() -> Router {
    Router::new()
        .route(
            "/v2/resources/types",
            get(list_types).post(create_type).delete(delete_type),
        )
        .route("/v2/resources", post(create_resource))
        .route("/v2/admin/restore", put(restore_deleted))
        .route("/v2/user/login", post(login))
        .route("/v2/user/logout", post(logout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
