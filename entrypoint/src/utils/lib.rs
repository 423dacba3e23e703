pub mod catalog;
pub mod logger;
pub mod runner;
pub mod server;
pub mod state;
