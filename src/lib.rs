pub mod action;
pub mod app;
pub mod config;
pub mod diagnostics;
pub mod event;
pub mod format;
pub mod logger;
pub mod system;
pub mod ui;
