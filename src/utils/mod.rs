pub mod closest;
pub mod datetime;
pub mod edit_distance;
pub mod feedback;
pub mod logging;
pub mod markdown;
pub mod validation;
