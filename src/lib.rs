pub mod analyzer;
pub mod config;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod output;
pub mod source;
pub mod stats;
