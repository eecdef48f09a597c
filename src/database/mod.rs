/// Connection pool and migrations
pub mod connection;
/// Row types for classes, teachers and their links
pub mod models;
