pub mod blog_card;
pub mod filter_bar;
pub mod lead_form;
pub mod property_card;

pub use blog_card::blog_card;
pub use filter_bar::filter_bar;
pub use lead_form::lead_form;
pub use property_card::property_card;
