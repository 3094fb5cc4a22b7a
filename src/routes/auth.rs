use actix_web::{post, routes, web};

use crate::auth::{password, token, CurrentUser, PrincipalRegistry};
use crate::error::{AppError, AuthError};
use crate::models::{LoginForm, MessageResponse, TokenResponse};
use crate::state::AppState;

/// Exchange the configured username and password for a bearer token.
#[post("/token")]
pub async fn login(
    form: web::Form<LoginForm>,
    state: web::Data<AppState>,
) -> Result<web::Json<TokenResponse>, AppError> {
    let LoginForm {
        username,
        password: candidate,
        ..
    } = form.into_inner();

    // Unknown users are checked against a decoy so both rejections cost a bcrypt verify.
    let known_hash = state.auth.password_hash(&username).map(str::to_owned);
    let user_known = known_hash.is_some();
    let stored_hash = known_hash.unwrap_or_else(|| state.decoy_hash.to_string());

    let matches = password::verify_blocking(candidate, stored_hash).await?;
    if !user_known || !matches {
        tracing::warn!(%username, "login rejected");
        return Err(AuthError::BadCredentials.into());
    }

    let access_token = token::issue(&username, None, &state.auth)?;
    tracing::info!(%username, "issued access token");
    Ok(web::Json(TokenResponse::bearer(access_token)))
}

#[routes]
#[get("/protected")]
#[get("/protected/")]
pub async fn protected(user: CurrentUser) -> web::Json<MessageResponse> {
    web::Json(MessageResponse {
        message: format!("Welcome, {}!", user.username()),
    })
}
