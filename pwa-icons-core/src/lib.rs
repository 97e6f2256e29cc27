pub mod config;
pub mod favicon;
pub mod generate;
pub mod render;
pub mod source;
