pub mod classifier;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod session;
