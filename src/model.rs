pub mod member_age;
pub mod migration;
pub mod policy;
pub mod slowmode;
