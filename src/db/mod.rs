pub mod connection;
pub mod models;
pub mod store;

pub use connection::{get_connection, DbPool};
pub use models::*;
