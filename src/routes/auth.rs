use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::http::StatusCode;
use actix_web::{web, FromRequest, HttpRequest, HttpResponse, ResponseError};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use thiserror::Error;

use crate::models::{ErrorResponse, Plan};

/// Session token settings
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub cookie_name: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum AuthError {
    #[error("missing session token")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("authentication is not configured")]
    NotConfigured,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: "Unauthorized".to_string(),
            message: self.to_string(),
            status_code: self.status_code().as_u16(),
        })
    }
}

/// Claims carried by the session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    #[serde(default)]
    pub plan: Option<Plan>,
}

/// The authenticated caller
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub user_id: String,
    pub plan: Plan,
}

/// Decode and validate an HS256 session token
pub fn verify_token(token: &str, secret: &str) -> Result<AuthUser, AuthError> {
    let validation = Validation::new(Algorithm::HS256);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|err| AuthError::InvalidToken(err.to_string()))?;

    if data.claims.sub.trim().is_empty() {
        return Err(AuthError::InvalidToken("empty subject".into()));
    }

    Ok(AuthUser {
        user_id: data.claims.sub,
        plan: data.claims.plan.unwrap_or_default(),
    })
}

/// Find the session token, preferring the cookie over the Authorization header
fn extract_token(req: &HttpRequest, cookie_name: &str) -> Option<String> {
    if let Some(cookie) = req.cookie(cookie_name) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
}

fn authorize(req: &HttpRequest) -> Result<AuthUser, AuthError> {
    let config = req
        .app_data::<web::Data<AuthConfig>>()
        .ok_or(AuthError::NotConfigured)?;

    let token = extract_token(req, &config.cookie_name).ok_or(AuthError::MissingToken)?;
    verify_token(&token, &config.jwt_secret)
}

impl FromRequest for AuthUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = authorize(req);
        if let Err(e) = &result {
            tracing::debug!("Rejected request to {}: {}", req.path(), e);
        }
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn token_for(sub: &str, plan: Option<Plan>) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
            plan,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn auth_config() -> web::Data<AuthConfig> {
        web::Data::new(AuthConfig {
            jwt_secret: SECRET.to_string(),
            cookie_name: "token".to_string(),
        })
    }

    #[test]
    fn test_verify_token() {
        let user = verify_token(&token_for("user_1", Some(Plan::Premium)), SECRET).unwrap();
        assert_eq!(user.user_id, "user_1");
        assert_eq!(user.plan, Plan::Premium);
    }

    #[test]
    fn test_plan_defaults_to_free() {
        let user = verify_token(&token_for("user_1", None), SECRET).unwrap();
        assert_eq!(user.plan, Plan::Free);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let result = verify_token(&token_for("user_1", None), "other-secret");
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[actix_web::test]
    async fn test_token_from_cookie() {
        let req = TestRequest::default()
            .app_data(auth_config())
            .cookie(Cookie::new("token", token_for("cookie_user", None)))
            .to_http_request();

        assert_eq!(authorize(&req).unwrap().user_id, "cookie_user");
    }

    #[actix_web::test]
    async fn test_token_from_bearer_header() {
        let req = TestRequest::default()
            .app_data(auth_config())
            .insert_header((AUTHORIZATION, format!("Bearer {}", token_for("bearer_user", None))))
            .to_http_request();

        assert_eq!(authorize(&req).unwrap().user_id, "bearer_user");
    }

    #[actix_web::test]
    async fn test_missing_token() {
        let req = TestRequest::default().app_data(auth_config()).to_http_request();
        assert_eq!(authorize(&req).unwrap_err(), AuthError::MissingToken);
    }
}
