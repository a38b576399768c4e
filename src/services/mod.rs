pub mod auth;
pub mod dish;
pub mod google;
pub mod token;
