/// Offline dataset rebuild from schedule exports and the teacher directory
pub mod dataset;
/// Schedule export downloads
pub mod download;
/// Health and keep-alive HTTP endpoints
pub mod health;
/// Surname resolution and reply formatting
pub mod lookup;
