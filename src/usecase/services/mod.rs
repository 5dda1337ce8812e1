pub mod dataset_service;
pub mod report_service;
