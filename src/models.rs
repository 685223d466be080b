pub mod category;
pub mod health_dto;
pub mod listing_dto;
pub mod notice_dto;

pub use category::Category;
pub use listing_dto::CategorizedListing;
pub use notice_dto::Notice;
