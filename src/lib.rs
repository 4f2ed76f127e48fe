pub mod bulletin;
pub mod config;
pub mod fetch;
pub mod infra;
pub mod models;
pub mod niveau;
pub mod output;
pub mod parser;
pub mod render;
pub mod search;
pub mod services;
