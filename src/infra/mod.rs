pub mod http;
pub mod import;
pub mod postgrest;
pub mod sqlite;
