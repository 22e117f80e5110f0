//! Host-side implementations of the logging, timer and render contracts.

pub mod rendering;
pub mod services;
pub mod timers;

pub use rendering::*;
pub use services::*;
pub use timers::*;
