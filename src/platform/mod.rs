//! Implementations of the platform capabilities the controller and the
//! agent depend on
pub mod console;
pub mod memory;
