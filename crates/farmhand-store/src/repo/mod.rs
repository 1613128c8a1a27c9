pub mod buyers;
pub mod groups;
pub mod sellers;
pub mod tags;

pub use buyers::{BuyerNew, BuyerUpdate, BuyersRepo};
pub use groups::{GroupNew, GroupsRepo};
pub use sellers::{SellerNew, SellersRepo};
pub use tags::TagsRepo;

use crate::error::Result;

/// Array-valued columns (tags, locations, property types) are stored as
/// JSON text; an empty or missing cell decodes to an empty list.
pub(crate) fn encode_labels(labels: &[String]) -> Result<String> {
    Ok(serde_json::to_string(labels)?)
}

pub(crate) fn decode_labels(raw: &str) -> Result<Vec<String>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(raw)?)
}
