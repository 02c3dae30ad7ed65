pub mod config;
pub mod error;
pub mod paths;
pub mod plan;
pub mod slug;
pub mod tree;
