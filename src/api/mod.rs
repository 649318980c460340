mod client;
pub mod public;
pub use client::{Endpoints, ServerClient};
