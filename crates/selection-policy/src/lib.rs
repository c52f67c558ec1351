//! CapView Selection Policy Engine
//!
//! Derives sensible monitor selections from the connected monitor set:
//! - **Smart defaults:** a fixed decision tree over monitor count and
//!   characteristics, with rationale, confidence, and alternatives
//! - **Profiles:** named, reusable selection rules (built-in and custom),
//!   with recommendations, compatibility checks, and import/export
//! - **Usage history:** an externally-owned append-only application log
//!   with derived per-profile statistics
//!
//! Everything here is pure over its inputs: the engine holds no state
//! between calls and is free of concurrency concerns by construction.

pub mod defaults;
pub mod history;
pub mod profiles;
pub mod transfer;

pub use defaults::*;
pub use history::*;
pub use profiles::*;
pub use transfer::*;
