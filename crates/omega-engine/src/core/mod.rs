//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and
//! applications built on the engine.

mod app;

pub use app::{App, AppControl, SceneInit};
