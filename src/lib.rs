pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod loader;
pub mod storage;
pub mod sync;
