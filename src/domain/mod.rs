pub mod blog;
pub mod geo;
pub mod lead;
pub mod location;
pub mod property;
pub mod slug;
