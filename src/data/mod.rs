pub mod analysis;
pub mod archive;
pub mod classifier;
pub mod loader;
pub mod models;
pub mod sentiment;
pub mod stop_words;
pub mod timeline;
pub mod utils;
