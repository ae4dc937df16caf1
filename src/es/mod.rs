pub mod admin;
pub mod bootstrap;
pub mod client;
pub mod mapping;
