pub mod category;
pub mod price_override;
pub mod price_report;
pub mod vendor;
