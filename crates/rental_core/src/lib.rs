pub mod core_api;
pub mod dex;
pub mod layout;
pub mod listing;
pub mod reader;
