pub mod discord;
pub mod policy_store;
pub mod settings;
