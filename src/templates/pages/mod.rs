pub mod admin_blog;
pub mod admin_dashboard;
pub mod admin_leads;
pub mod admin_properties;
pub mod blog;
pub mod home;
pub mod institutional;
pub mod neighborhoods;
pub mod properties;
