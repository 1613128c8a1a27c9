use crate::domain::{BuyerId, SellerId};
use crate::filter::SmartGroupCounts;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerListItemDto {
    pub id: BuyerId,
    pub display_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub score: i64,
    pub status: String,
    pub vip: bool,
    pub vetted: bool,
    pub tags: Vec<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerDetailDto {
    pub id: BuyerId,
    pub display_name: String,
    pub fname: Option<String>,
    pub lname: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub phone2: Option<String>,
    pub phone3: Option<String>,
    pub company: Option<String>,
    pub score: i64,
    pub notes: Option<String>,
    pub mailing_address: Option<String>,
    pub mailing_city: Option<String>,
    pub mailing_state: Option<String>,
    pub mailing_zip: Option<String>,
    pub locations: Vec<String>,
    pub tags: Vec<String>,
    pub vetted: bool,
    pub vip: bool,
    pub can_receive_sms: bool,
    pub can_receive_email: bool,
    pub property_type: Vec<String>,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub timeline: Option<String>,
    pub source: Option<String>,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub groups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerListItemDto {
    pub id: SellerId,
    pub name: String,
    pub email: Option<String>,
    pub property_address: Option<String>,
    pub asking_price: Option<i64>,
    pub timeline: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCountDto {
    pub status: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardDto {
    pub total_buyers: usize,
    pub total_sellers: usize,
    pub total_groups: usize,
    pub average_score: f64,
    pub new_this_week: usize,
    pub smart_groups: SmartGroupCounts,
    pub statuses: Vec<StatusCountDto>,
}
