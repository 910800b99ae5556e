//! Materials and lights with light group lists, group editing, and resync triggers.
#![forbid(unsafe_code)]

pub mod config;
pub mod edit;
pub mod entity;
pub mod scene;
pub mod trigger;

pub use edit::EditError;
pub use entity::{EntityRef, Light, Material};
pub use scene::{Scene, SyncReport};
pub use trigger::{Changed, EvalMode, Trigger};
