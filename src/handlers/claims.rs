use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header::HeaderMap;
use actix_web::{FromRequest, HttpRequest};
use uuid::Uuid;

use crate::domain::identity::{Claims, Role};
use crate::errors::AppError;

// Identity headers set by the upstream authentication gateway after token
// verification (token handling itself is outside this service).
pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";
pub const USER_ROLE_HEADER: &str = "x-user-role";

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, AppError> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::Unauthenticated)
}

pub fn claims_from_headers(headers: &HeaderMap) -> Result<Claims, AppError> {
    let subject = Uuid::parse_str(header(headers, USER_ID_HEADER)?)
        .map_err(|_| AppError::Unauthenticated)?;
    let full_name = header(headers, USER_NAME_HEADER)?.to_string();
    let role: Role = header(headers, USER_ROLE_HEADER)?
        .parse()
        .map_err(|_| AppError::Unauthenticated)?;

    Ok(Claims {
        subject,
        full_name,
        role,
    })
}

impl FromRequest for Claims {
    type Error = AppError;
    type Future = Ready<Result<Claims, AppError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(claims_from_headers(req.headers()))
    }
}
