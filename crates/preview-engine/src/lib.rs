//! CapView Preview Engine
//!
//! Runs live, low-overhead preview capture sessions so the user can see
//! what each monitor shows before committing to a recording selection.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            PreviewCoordinator                 │
//! │  registry: monitor id → session + cancel      │
//! │  ┌─────────┐  ┌─────────┐  ┌─────────┐       │
//! │  │ loop @  │  │ loop @  │  │ loop @  │  ...  │
//! │  │ monitor │  │ monitor │  │ monitor │       │
//! │  └────┬────┘  └────┬────┘  └────┬────┘       │
//! │       ▼            ▼            ▼             │
//! │  ┌──────────────────────────────────────┐    │
//! │  │     CaptureBackend (external)        │    │
//! │  └──────────────────────────────────────┘    │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Each active monitor owns one independent, cancelable periodic task.
//! Ticks are serialized per monitor (one capture in flight at a time);
//! sessions share no state beyond the coordinator's own registry.

pub mod backend;
pub mod coordinator;
pub mod synthetic;

pub use backend::*;
pub use coordinator::*;
pub use synthetic::SyntheticBackend;
