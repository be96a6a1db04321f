pub mod database;
pub mod logging;
pub mod ops_policy;
pub mod parameter;
