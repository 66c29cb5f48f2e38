pub mod ai;
pub mod config;
pub mod controller;
pub mod data_url;
pub mod intent;
pub mod session;
pub mod styles;
pub mod types;
pub mod ui;
pub mod views;
