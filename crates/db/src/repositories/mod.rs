//! Repository layer: one zero-sized struct per table.

pub mod category_repo;
pub mod price_override_repo;
pub mod price_report_repo;
pub mod vendor_repo;

pub use category_repo::{CategoryDeletion, CategoryRepo};
pub use price_override_repo::PriceOverrideRepo;
pub use price_report_repo::PriceReportRepo;
pub use vendor_repo::VendorRepo;
