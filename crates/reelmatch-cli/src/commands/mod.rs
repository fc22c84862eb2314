pub mod config;
pub mod context;
pub mod details;
pub mod find;
pub mod library;
pub mod person;
pub mod prompts;
pub mod search;
pub mod season;
pub mod ui;
pub mod videos;
