pub mod answer;
pub mod app_state;
pub mod completion;
pub mod config;
pub mod fetcher;
