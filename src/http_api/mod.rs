use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::{Feedback, Game, OperationOutcome, RecordStore, Referee, StoreError, StoreResult};

#[derive(Clone)]
pub struct AppState {
    store: Arc<RwLock<RecordStore>>,
}

impl AppState {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    fn store(&self) -> Arc<RwLock<RecordStore>> {
        self.store.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    success: bool,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(kind) => ApiError::NotFound(kind.message().to_string()),
            StoreError::Persistence(err) => {
                error!(error = %err, "failed to persist records");
                ApiError::Internal(format!("failed to save records: {err}"))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        };
        let body = Json(ErrorBody {
            error,
            success: false,
            message,
        });
        (status, body).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct NewReferee {
    pub name: String,
    #[serde(default)]
    pub expertise: String,
}

#[derive(Debug, Deserialize)]
pub struct NewGame {
    pub game_id: String,
    #[serde(default)]
    pub game_name: String,
}

#[derive(Debug, Deserialize)]
pub struct Assignment {
    pub game_id: String,
    pub referee_name: String,
}

/// Identifiers travel in the query string so empty names and names with `/`
/// stay addressable.
#[derive(Debug, Deserialize)]
pub struct RefereeKey {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct GameKey {
    pub game_id: String,
}

#[derive(Debug, Deserialize)]
pub struct NewFeedback {
    pub game_id: String,
    pub referee_name: String,
    #[serde(default)]
    pub performance: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/referees",
            get(list_referees)
                .post(create_referee)
                .delete(delete_referee),
        )
        .route(
            "/games",
            get(list_games).post(create_game).delete(delete_game),
        )
        .route("/assignments", post(assign_referee))
        .route("/feedback", get(list_feedback).post(create_feedback))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, store: RecordStore) -> std::io::Result<()> {
    let state = AppState::new(store);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

fn outcome(result: StoreResult<&'static str>) -> Result<Json<OperationOutcome>, ApiError> {
    let message = result.map_err(ApiError::from)?;
    Ok(Json(OperationOutcome::ok(message)))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn list_referees(State(state): State<AppState>) -> Json<Vec<Referee>> {
    let store = state.store();
    let referees = store.read().referees().to_vec();
    Json(referees)
}

async fn list_games(State(state): State<AppState>) -> Json<Vec<Game>> {
    let store = state.store();
    let games = store.read().games().to_vec();
    Json(games)
}

async fn list_feedback(State(state): State<AppState>) -> Json<Vec<Feedback>> {
    let store = state.store();
    let feedback = store.read().feedback().to_vec();
    Json(feedback)
}

async fn create_referee(
    State(state): State<AppState>,
    Json(payload): Json<NewReferee>,
) -> Result<(StatusCode, Json<OperationOutcome>), ApiError> {
    let store = state.store();
    let result = store.write().add_referee(payload.name, payload.expertise);
    Ok((StatusCode::CREATED, outcome(result)?))
}

async fn create_game(
    State(state): State<AppState>,
    Json(payload): Json<NewGame>,
) -> Result<(StatusCode, Json<OperationOutcome>), ApiError> {
    let store = state.store();
    let result = store.write().add_game(payload.game_id, payload.game_name);
    Ok((StatusCode::CREATED, outcome(result)?))
}

async fn assign_referee(
    State(state): State<AppState>,
    Json(payload): Json<Assignment>,
) -> Result<Json<OperationOutcome>, ApiError> {
    let store = state.store();
    let result = store
        .write()
        .assign_referee_to_game(payload.game_id, &payload.referee_name);
    outcome(result)
}

async fn create_feedback(
    State(state): State<AppState>,
    Json(payload): Json<NewFeedback>,
) -> Result<(StatusCode, Json<OperationOutcome>), ApiError> {
    let store = state.store();
    let result = store.write().add_feedback(
        payload.game_id,
        &payload.referee_name,
        payload.performance,
    );
    Ok((StatusCode::CREATED, outcome(result)?))
}

async fn delete_referee(
    State(state): State<AppState>,
    Query(key): Query<RefereeKey>,
) -> Result<Json<OperationOutcome>, ApiError> {
    let store = state.store();
    let result = store.write().remove_referee(&key.name);
    outcome(result)
}

async fn delete_game(
    State(state): State<AppState>,
    Query(key): Query<GameKey>,
) -> Result<Json<OperationOutcome>, ApiError> {
    let store = state.store();
    let result = store.write().remove_game(key.game_id);
    outcome(result)
}
