use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{
            ForgotRequest, LoginRequest, ProfileRequest, ResetResponse, SignupRequest,
            SignupResponse, UpdateResponse,
        },
        services::AccountService,
    },
    envelope::{Empty, Envelope},
    error::AppError,
    state::AppState,
};

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/reset", post(reset))
        .route("/update", post(update))
        .route("/forgot", post(forgot))
}

#[instrument(skip(accounts, payload))]
pub async fn signup(
    State(accounts): State<AccountService>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<Envelope<SignupResponse>>, AppError> {
    let Json(payload) = payload?;
    let (id, token) = accounts
        .signup(&payload.email, &payload.firstname, &payload.lastname)
        .await?;
    Ok(Envelope::ok(SignupResponse { id, token }))
}

#[instrument(skip(accounts, payload))]
pub async fn login(
    State(accounts): State<AccountService>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Envelope<Empty>>, AppError> {
    let Json(payload) = payload?;
    accounts.login(&payload.email, &payload.password).await?;
    Ok(Envelope::ok(Empty {}))
}

#[instrument(skip(accounts, payload))]
pub async fn reset(
    State(accounts): State<AccountService>,
    payload: Result<Json<ProfileRequest>, JsonRejection>,
) -> Result<Json<Envelope<ResetResponse>>, AppError> {
    let Json(payload) = payload?;
    let user = accounts
        .reset(&payload.email, &payload.token, &payload.changes())
        .await?;
    Ok(Envelope::ok(ResetResponse {
        email: user.email,
        token: payload.token,
    }))
}

#[instrument(skip(accounts, payload))]
pub async fn update(
    State(accounts): State<AccountService>,
    payload: Result<Json<ProfileRequest>, JsonRejection>,
) -> Result<Json<Envelope<UpdateResponse>>, AppError> {
    let Json(payload) = payload?;
    let user = accounts
        .update(&payload.email, &payload.token, &payload.changes())
        .await?;
    Ok(Envelope::ok(UpdateResponse {
        id: user.id,
        token: payload.token,
    }))
}

#[instrument(skip(accounts, payload))]
pub async fn forgot(
    State(accounts): State<AccountService>,
    payload: Result<Json<ForgotRequest>, JsonRejection>,
) -> Result<Json<Envelope<Empty>>, AppError> {
    let Json(payload) = payload?;
    accounts.request_reset(&payload.email).await?;
    Ok(Envelope::ok(Empty {}))
}
