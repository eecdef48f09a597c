/// Command definitions and their handlers
pub mod commands;
/// Per-chat dialogue state for the surname lookup
pub mod dialogue;
/// Update routing
pub mod handlers;
#[cfg(test)]
mod mock_api;
