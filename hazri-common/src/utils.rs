//! Request-scoped identity. Handlers decode the bearer token once and pass
//! the claims down as explicit data; nothing below the HTTP layer reads
//! ambient session state.

use actix_web::HttpRequest;
use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

lazy_static! {
    static ref JWT_SECRET: String =
        std::env::var("JWT_SECRET").unwrap_or_else(|_| "hazri-dev-secret".to_string());
}

const TOKEN_TTL_HOURS: i64 = 24;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub role: Role,
    pub exp: i64,
}

/// Mint a token for a user. The login service that authenticates
/// credentials and calls this lives outside this workspace; it is also what
/// operators use to issue tokens for manual testing.
pub fn create_token(user_id: i32, role: Role) -> Result<String> {
    let claims = Claims {
        sub: user_id,
        role,
        exp: (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )?;
    Ok(token)
}

pub fn decode_token(token: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(JWT_SECRET.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .ok()
}

/// Claims from the `Authorization: Bearer` header, if present and valid.
pub fn get_claims(req: &HttpRequest) -> Option<Claims> {
    let header = req.headers().get("Authorization")?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;
    decode_token(token)
}
