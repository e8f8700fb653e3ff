pub mod discord;
pub mod infrastructure;
pub mod model;
pub mod traversal;
pub mod types;
