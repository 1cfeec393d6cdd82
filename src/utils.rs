pub mod logs;
pub mod validation;
