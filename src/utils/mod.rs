pub mod paths;
pub mod platform;
pub mod sanitize;
