//! # Teacher Finder Bot
//! 
//! A Telegram bot that tells students when and where a teacher has classes.
//! 
//! ## Features
//! - Parse exported schedule spreadsheets into individual classes
//! - Link classes to teachers by surname
//! - Find a teacher's upcoming classes by surname, with suggestions for typos
//! - Persistent storage with SQLite, rebuilt offline by `build-dataset`

/// Bot command handlers and message processing
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Database models, connections, and migrations
pub mod database;
/// Schedule grid and header date parsing
pub mod parser;
/// Dataset build, teacher lookup and health endpoints
pub mod services;
/// Edit distance, formatting, validation and logging helpers
pub mod utils;
