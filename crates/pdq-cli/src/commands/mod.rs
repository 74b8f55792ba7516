pub mod config;
pub mod dispatch;
pub mod report;
pub mod run;
