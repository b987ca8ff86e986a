pub mod config;
pub mod constants;
pub mod retry;
pub mod string_manipulators;
