//! Core engine types: entities, kinds, positions, configuration.
//!
//! This module contains the value types every other module builds on.
//! None of them know about grids, rules or presenters beyond the opaque
//! visual handle each entity carries.

pub mod config;
pub mod entity;
pub mod kind;
pub mod position;

pub use config::{EngineConfig, DEFAULT_HISTORY_CAP};
pub use entity::{Entity, EntityId};
pub use kind::{Kind, NounKind, RuleKind, Word};
pub use position::{Direction, Position};
