pub mod auth;
pub mod ops_gate;
