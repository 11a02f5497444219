//! Request bodies.
//!
//! Every field is optional at the serde level so that a missing field is
//! reported as a validation error naming the field, before the engine or
//! the store is touched.

use super::error::ApiError;
use ath_01_catalog::ItemKind;
use ath_02_progress::{ChestType, DonationPayload};
use serde::Deserialize;
use shared_types::{CardId, Currency, PlayerId};

fn required<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::bad_request(format!("{} is required", field)))
}

fn required_str<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ApiError> {
    match value.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(ApiError::bad_request(format!("{} is required", field))),
    }
}

/// `POST /chests/unlock`, `POST /chests/open`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRequest {
    pub slot_index: Option<i64>,
}

impl SlotRequest {
    pub fn slot(&self) -> Result<usize, ApiError> {
        let index = required(self.slot_index, "slotIndex")?;
        usize::try_from(index)
            .map_err(|_| ApiError::bad_request("slotIndex must be a non-negative integer"))
    }
}

/// `POST /shop/buy`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyItemRequest {
    pub item_id: Option<String>,
    pub item_type: Option<String>,
}

impl BuyItemRequest {
    pub fn parse(&self) -> Result<(ItemKind, String), ApiError> {
        let item_id = required_str(&self.item_id, "itemId")?;
        let kind = required_str(&self.item_type, "itemType")?
            .parse::<ItemKind>()
            .map_err(|e| ApiError::bad_request(e.to_string()))?;
        Ok((kind, item_id.to_string()))
    }
}

/// `POST /social/donate`
///
/// `type` is `currency` (with `amount` and an optional `currency`,
/// defaulting to books) or `card` (with `cardId`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonateRequest {
    pub target_user_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub currency: Option<String>,
    pub amount: Option<u64>,
    pub card_id: Option<String>,
}

impl DonateRequest {
    pub fn parse(&self) -> Result<(PlayerId, DonationPayload), ApiError> {
        let target = PlayerId::new(required_str(&self.target_user_id, "targetUserId")?)
            .map_err(|e| ApiError::bad_request(e.to_string()))?;

        let payload = match required_str(&self.kind, "type")? {
            "currency" => {
                let currency = match self.currency.as_deref() {
                    Some(raw) => raw
                        .parse::<Currency>()
                        .map_err(|e| ApiError::bad_request(e.to_string()))?,
                    None => Currency::Books,
                };
                let amount = required(self.amount, "amount")?;
                if amount == 0 {
                    return Err(ApiError::bad_request("amount must be greater than zero"));
                }
                DonationPayload::Currency { currency, amount }
            }
            "card" => {
                let card_id = CardId::new(required_str(&self.card_id, "cardId")?)
                    .map_err(|e| ApiError::bad_request(e.to_string()))?;
                DonationPayload::Card { card_id }
            }
            other => {
                return Err(ApiError::bad_request(format!(
                    "Unknown donation type: {}",
                    other
                )))
            }
        };
        Ok((target, payload))
    }
}

/// `POST /chests/award`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardChestRequest {
    pub chest_type: Option<String>,
}

impl AwardChestRequest {
    pub fn parse(&self) -> Result<ChestType, ApiError> {
        required_str(&self.chest_type, "chestType")?
            .parse::<ChestType>()
            .map_err(ApiError::bad_request)
    }
}

/// `POST /progress/trophies`
#[derive(Debug, Default, Deserialize)]
pub struct TrophiesRequest {
    pub amount: Option<i64>,
}

impl TrophiesRequest {
    pub fn parse(&self) -> Result<u32, ApiError> {
        let amount = required(self.amount, "amount")?;
        match u32::try_from(amount) {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ApiError::bad_request("amount must be a positive integer")),
        }
    }
}

/// `POST /guilds`
#[derive(Debug, Default, Deserialize)]
pub struct CreateGuildRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CreateGuildRequest {
    pub fn parse(&self) -> Result<(String, String), ApiError> {
        let name = required_str(&self.name, "name")?;
        Ok((
            name.to_string(),
            self.description.clone().unwrap_or_default(),
        ))
    }
}
