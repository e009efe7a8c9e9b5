// src/core/mod.rs

pub mod sanitize;
pub mod usernames;

pub use usernames::parse_usernames;
