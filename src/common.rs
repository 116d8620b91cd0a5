pub mod error;
pub mod orden;
pub mod parche;
