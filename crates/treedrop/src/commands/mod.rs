pub mod ask;
pub mod config;
pub mod drag;
pub mod list;
pub mod tree;
