pub mod client;
pub mod framework;
