pub mod approval;
pub mod auth;
pub mod dashboard;
pub mod inventory;
pub mod location;
pub mod transaction;
