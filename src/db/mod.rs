pub mod amenities;
pub mod auth;
pub mod blog;
pub mod connection;
pub mod leads;
pub mod locations;
pub mod properties;

pub use connection::Database;
