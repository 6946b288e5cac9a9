pub mod categories;
pub mod preview;
pub mod pricing;
pub mod vendors;
