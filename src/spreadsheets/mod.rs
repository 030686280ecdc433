pub mod export_leads;
