//! Chart aggregate: viewport window, its controller and coordinate mapping.

pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use services::*;
pub use value_objects::*;
