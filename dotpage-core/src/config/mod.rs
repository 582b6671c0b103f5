//! Configuration types
//!
//! User settings and their fixed-offset layout in the persistent store.

pub mod layout;
pub mod settings;

pub use layout::*;
pub use settings::*;
