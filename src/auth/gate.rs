use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header::{self, Header};
use actix_web::{web, FromRequest, HttpRequest};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};

use super::{token, Principal};
use crate::error::{AppError, AuthError};
use crate::state::AppState;

/// Extractor that admits a request only with a valid bearer token.
///
/// Taking `CurrentUser` as a handler argument is what makes a route protected.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

impl CurrentUser {
    pub fn username(&self) -> &str {
        &self.0.username
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(CurrentUser))
    }
}

fn authenticate(req: &HttpRequest) -> Result<Principal, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not registered"))?;

    let token = bearer_token(req)?;
    Ok(token::verify(&token, &state.auth)?)
}

fn bearer_token(req: &HttpRequest) -> Result<String, AuthError> {
    if !req.headers().contains_key(header::AUTHORIZATION) {
        return Err(AuthError::MissingToken);
    }

    let bearer = Authorization::<Bearer>::parse(req)
        .map_err(|_| AuthError::MissingToken)?
        .into_scheme();
    let token = bearer.token().trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token.to_owned())
}
