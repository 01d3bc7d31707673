//! Shop purchase models.

use serde::{Deserialize, Serialize};

/// Item type of cosmetic skins in the shop.
pub const SKIN_ITEM_TYPE: &str = "skin";

/// An item the student bought.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: String,
    pub item_id: String,
    pub item_type: String,
    pub name: String,
    #[serde(default)]
    pub active: bool,
}

/// Response of `GET /api/student/shop/purchases`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchasesResponse {
    pub purchases: Vec<Purchase>,
}

impl PurchasesResponse {
    /// The skin currently equipped, if any.
    pub fn active_skin(&self) -> Option<&Purchase> {
        self.purchases
            .iter()
            .find(|purchase| purchase.item_type == SKIN_ITEM_TYPE && purchase.active)
    }
}
