//! Page use-case services.
//!
//! # Responsibility
//! - Compose host capabilities into page behaviors: element construction,
//!   error notices, item management and startup wiring.
//! - Keep behaviors host-agnostic; regions are injected, not re-queried.

pub mod element_factory;
pub mod item_manager;
pub mod notifier;
pub mod simulation;
