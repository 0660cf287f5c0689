pub mod analyze_document;
pub mod analyze_page;
pub mod query;
