pub mod analysis;
pub mod chart;
pub mod config;
pub mod table;
