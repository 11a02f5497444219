//! HTTP routes and handlers.
//!
//! | Method | Path | Body | Success |
//! |--------|------|------|---------|
//! | GET  | `/health` | | `{status, service, version}` |
//! | GET  | `/progress` | | player document (created on first call) |
//! | POST | `/progress/trophies` | `{amount}` | player document |
//! | POST | `/chests/award` | `{chestType}` | `{message}` |
//! | POST | `/chests/unlock` | `{slotIndex}` | `{message}` |
//! | POST | `/chests/open` | `{slotIndex}` | `{message, rewards}` |
//! | POST | `/shop/buy` | `{itemId, itemType}` | `{message}` |
//! | POST | `/social/donate` | `{targetUserId, type, currency?, amount?, cardId?}` | `{message}` |
//! | POST | `/guilds` | `{name, description?}` | guild document |
//! | POST | `/guilds/:id/join` | | guild document |
//! | GET  | `/guilds/:id` | | guild document |

use crate::domain::error::ApiError;
use crate::domain::requests::{
    AwardChestRequest, BuyItemRequest, CreateGuildRequest, DonateRequest, SlotRequest,
    TrophiesRequest,
};
use crate::domain::responses::{MessageResponse, OpenChestResponse};
use crate::middleware::CallerIdentity;
use ath_02_progress::{Guild, PlayerProgress, ProgressApi, ProgressError};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderName;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use shared_types::GuildId;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn ProgressApi>,
    pub identity_header: HeaderName,
}

type JsonBody<T> = Result<Json<T>, JsonRejection>;

/// Builds the route table. Middleware is layered on by the service.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/progress", get(get_progress))
        .route("/progress/trophies", post(add_trophies))
        .route("/chests/award", post(award_chest))
        .route("/chests/unlock", post(unlock_chest))
        .route("/chests/open", post(open_chest))
        .route("/shop/buy", post(buy_item))
        .route("/social/donate", post(donate))
        .route("/guilds", post(create_guild))
        .route("/guilds/:id", get(get_guild))
        .route("/guilds/:id/join", post(join_guild))
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "athenaeum-api-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn get_progress(
    State(state): State<AppState>,
    CallerIdentity(player): CallerIdentity,
) -> Result<Json<PlayerProgress>, ApiError> {
    Ok(Json(state.api.sync_progress(&player).await?))
}

async fn add_trophies(
    State(state): State<AppState>,
    CallerIdentity(player): CallerIdentity,
    body: JsonBody<TrophiesRequest>,
) -> Result<Json<PlayerProgress>, ApiError> {
    let amount = body?.parse()?;
    Ok(Json(state.api.add_trophies(&player, amount).await?))
}

async fn award_chest(
    State(state): State<AppState>,
    CallerIdentity(player): CallerIdentity,
    body: JsonBody<AwardChestRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let chest_type = body?.parse()?;
    let slot = state.api.award_chest(&player, chest_type).await?;
    Ok(Json(MessageResponse::new(format!(
        "{} chest placed in slot {}",
        chest_type, slot
    ))))
}

async fn unlock_chest(
    State(state): State<AppState>,
    CallerIdentity(player): CallerIdentity,
    body: JsonBody<SlotRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let slot = body?.slot()?;
    state.api.unlock_chest(&player, slot).await?;
    Ok(Json(MessageResponse::new("Chest unlocking started")))
}

async fn open_chest(
    State(state): State<AppState>,
    CallerIdentity(player): CallerIdentity,
    body: JsonBody<SlotRequest>,
) -> Result<Json<OpenChestResponse>, ApiError> {
    let slot = body?.slot()?;
    let rewards = state.api.open_chest(&player, slot).await?;
    Ok(Json(OpenChestResponse {
        message: "Chest opened".to_string(),
        rewards,
    }))
}

async fn buy_item(
    State(state): State<AppState>,
    CallerIdentity(player): CallerIdentity,
    body: JsonBody<BuyItemRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let (kind, item_id) = body?.parse()?;
    let receipt = state.api.buy_item(&player, kind, &item_id).await?;
    Ok(Json(MessageResponse::new(format!(
        "Purchased {}",
        receipt.item_id
    ))))
}

async fn donate(
    State(state): State<AppState>,
    CallerIdentity(player): CallerIdentity,
    body: JsonBody<DonateRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let (target, payload) = body?.parse()?;
    state.api.donate(&player, &target, payload).await?;
    Ok(Json(MessageResponse::new(format!("Donation sent to {}", target))))
}

async fn create_guild(
    State(state): State<AppState>,
    CallerIdentity(player): CallerIdentity,
    body: JsonBody<CreateGuildRequest>,
) -> Result<Json<Guild>, ApiError> {
    let (name, description) = body?.parse()?;
    Ok(Json(state.api.create_guild(&player, &name, &description).await?))
}

async fn join_guild(
    State(state): State<AppState>,
    CallerIdentity(player): CallerIdentity,
    Path(id): Path<String>,
) -> Result<Json<Guild>, ApiError> {
    let guild_id = parse_guild_id(&id)?;
    Ok(Json(state.api.join_guild(&player, guild_id).await?))
}

async fn get_guild(
    State(state): State<AppState>,
    CallerIdentity(_): CallerIdentity,
    Path(id): Path<String>,
) -> Result<Json<Guild>, ApiError> {
    let guild_id = parse_guild_id(&id)?;
    state
        .api
        .get_guild(guild_id)
        .await?
        .map(Json)
        .ok_or_else(|| ProgressError::GuildNotFound(guild_id).into())
}

fn parse_guild_id(raw: &str) -> Result<GuildId, ApiError> {
    raw.parse()
        .map_err(|e: shared_types::IdentifierError| ApiError::bad_request(e.to_string()))
}
