pub mod catalog;
pub mod entities;
pub mod grid;
