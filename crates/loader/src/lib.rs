#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod loader;
pub mod log;
pub mod report;
pub mod row;
