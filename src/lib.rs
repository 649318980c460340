pub mod agent;
pub mod api;
pub mod cli;
pub mod controller;
pub mod core;
pub mod notify;
pub mod platform;
pub mod push;
