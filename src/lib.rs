//! Library catalog manager: an in-memory catalog of book titles with search,
//! statistics and JSON persistence, driven by a text menu.

pub mod books;
pub mod catalog;
pub mod core;
pub mod utils;
