//! CapView Display Model
//!
//! Defines the core data contracts for multi-display capture configuration:
//! - **Monitors:** immutable descriptors of physical display geometry
//! - **Selection:** which monitors a recording targets and in what mode
//! - **Validation:** structural checks over monitor sets and selections
//!
//! Monitor descriptors arrive from an external device-enumeration
//! collaborator and are treated as untrusted input: callers should run
//! [`validation::validate_monitors`] before feeding them to selection or
//! preview logic.

pub mod monitor;
pub mod selection;
pub mod validation;

pub use monitor::*;
pub use selection::*;
pub use validation::*;
