pub mod column;
pub mod grid;
pub mod jockey;
pub mod plot;
pub mod record;
pub mod report;
pub mod report_filter;
