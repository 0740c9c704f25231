pub mod bundle;
pub mod error_utils;
pub mod loader;
pub mod models;
pub mod preheat;
pub mod validation;
