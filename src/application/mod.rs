pub mod config;
pub mod coordinator;
pub mod render;
pub mod scheduler;

pub use config::*;
pub use coordinator::*;
pub use render::*;
pub use scheduler::*;
