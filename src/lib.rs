pub mod config;
pub mod driver;
pub mod models;
pub mod services;
pub mod sink;
