pub mod datasource;
pub mod repo;
