//! Turning exported schedule spreadsheets into flat class records.

pub mod date;
pub mod grid;

pub use date::{parse_header_date, HeaderDate};
pub use grid::{normalize_cell, parse_grid, ClassRecord, Grid, TIME_LABEL};
