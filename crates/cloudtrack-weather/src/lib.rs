pub mod aggregate;
pub mod config;
pub mod display;
pub mod fetch;
pub mod history;
pub mod query;
pub mod report;
pub mod wttr;
