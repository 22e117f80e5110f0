//! Market data aggregate: bars, the append-only series and the synthetic source.

pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use services::*;
pub use value_objects::*;
