pub mod class_session;
pub mod link;
pub mod teacher;

pub use class_session::*;
pub use link::*;
pub use teacher::*;
