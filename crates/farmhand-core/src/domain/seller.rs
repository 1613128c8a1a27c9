use crate::domain::ids::SellerId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    pub id: SellerId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub score: i64,
    pub property_address: Option<String>,
    pub asking_price: Option<i64>,
    pub timeline: Option<String>,
    pub status: Option<String>,
    pub tags: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}
