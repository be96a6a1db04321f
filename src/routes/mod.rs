pub mod auth;
pub mod health;
pub mod ops;
pub mod profile;
pub mod register;
pub mod root;
