pub mod buyer;
pub mod group;
pub mod ids;
pub mod seller;
pub mod tag;

pub use buyer::{Buyer, BuyerStatus};
pub use group::{Group, GroupKind};
pub use ids::{BuyerId, GroupId, SellerId, TagId};
pub use seller::Seller;
pub use tag::Tag;
