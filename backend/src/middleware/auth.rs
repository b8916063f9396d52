//! Authentication middleware
//!
//! JWT authentication for the admin dashboard endpoints

use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ErrorResponse;

/// Authenticated admin information extracted from JWT
#[derive(Clone, Debug)]
pub struct AuthAdmin {
    pub admin_id: uuid::Uuid,
    pub email: String,
}

/// Authentication middleware that validates JWT tokens
/// Note: This middleware extracts and validates the JWT token from the Authorization header.
/// The actual token validation is done inline to avoid state dependency issues.
pub async fn auth_middleware(mut request: Request, next: Next) -> Response {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return unauthorized_response("Missing or invalid Authorization header");
        }
    };

    // Decode and validate JWT token
    // Get JWT secret from environment (fallback for middleware without state)
    let jwt_secret = std::env::var("STOCKPOINT__JWT__SECRET")
        .or_else(|_| std::env::var("STOCKPOINT_JWT_SECRET"))
        .unwrap_or_else(|_| "development-secret-key".to_string());

    let claims = match decode_jwt(token, &jwt_secret) {
        Ok(claims) => claims,
        Err(msg) => {
            return unauthorized_response(&msg);
        }
    };

    // Parse admin id from claims
    let admin_id = match uuid::Uuid::parse_str(&claims.sub) {
        Ok(id) => id,
        Err(_) => return unauthorized_response("Invalid admin ID in token"),
    };

    // Create AuthAdmin and insert into request extensions
    let auth_admin = AuthAdmin {
        admin_id,
        email: claims.email,
    };

    request.extensions_mut().insert(auth_admin);

    next.run(request).await
}

/// JWT claims structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct Claims {
    sub: String,
    email: String,
    exp: i64,
    iat: i64,
}

/// Decode and validate JWT token
fn decode_jwt(token: &str, secret: &str) -> Result<Claims, String> {
    use jsonwebtoken::{decode, DecodingKey, Validation};

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Invalid token: {}", e))
}

/// Create unauthorized response
fn unauthorized_response(message: &str) -> Response {
    let error = ErrorResponse {
        error: crate::error::ErrorDetail {
            code: "UNAUTHORIZED".to_string(),
            message: message.to_string(),
            fields: None,
        },
    };

    (StatusCode::UNAUTHORIZED, Json(error)).into_response()
}

/// Extractor for the authenticated admin
/// Use this in handlers to get the current admin
#[derive(Clone, Debug)]
pub struct CurrentAdmin(pub AuthAdmin);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentAdmin
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthAdmin>()
            .cloned()
            .map(CurrentAdmin)
            .ok_or_else(|| {
                let error = ErrorResponse {
                    error: crate::error::ErrorDetail {
                        code: "UNAUTHORIZED".to_string(),
                        message: "Authentication required".to_string(),
                        fields: None,
                    },
                };
                (StatusCode::UNAUTHORIZED, Json(error))
            })
    }
}
