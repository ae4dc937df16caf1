pub mod app;
pub mod cli;
pub mod config;
pub mod connector;
pub mod error;
pub mod es;
