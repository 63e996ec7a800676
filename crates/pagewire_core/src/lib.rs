//! Core page logic for pagewire.
//! Event wiring, validation and DOM helpers written against an abstract host
//! surface, so the same behavior runs in a browser bridge or in memory.

pub mod config;
pub mod host;
pub mod logging;
pub mod model;
pub mod service;
pub mod timing;

pub use config::{ConfigError, ElementIds, PageConfig};
pub use host::{
    Event, EventKind, HostError, HostResult, HostSurface, Listener, ManualScheduler, MemoryHost,
    NodeId, Scheduler, TimerId,
};
pub use logging::{init_logging, init_stderr_logging, logging_status, LogLevel, LogSink};
pub use model::element::ElementAttributes;
pub use model::validation::{
    validate_input, InputValidationError, ValidationResult, ValidationRules,
};
pub use service::element_factory::create_element;
pub use service::item_manager::ItemManager;
pub use service::notifier::ErrorNotifier;
pub use service::simulation::{
    initialize_simulation, install_on_ready, PageElements, Simulation, SubmitOutcome,
};
pub use timing::{debounce, throttle, Debounced, Throttled};

/// Minimal health-check API for host bridges.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
