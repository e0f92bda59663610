pub mod assistant;
pub mod config;
pub mod handlers;
pub mod helpers;
pub mod logging;
pub mod models;
