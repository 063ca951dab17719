pub mod auth;
pub mod catalog;
pub mod customers;
pub mod dashboard;
pub mod device_auth;
pub mod repairs;
pub mod settings;
pub mod showrooms;
pub mod users;
