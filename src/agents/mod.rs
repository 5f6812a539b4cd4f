//! The session/dispatch core.
//!
//! Executors turn one prompt into one reply, sessions add per-target
//! conversation state, the registry dispatches by name, and the
//! orchestrator lets a routing model pick the target itself. The builder
//! assembles all of it from configuration.

pub mod builder;
pub mod executor;
pub mod local;
pub mod orchestrator;
pub mod registry;
pub mod remote;
pub mod session;

pub use builder::{build, BuildDefaults, Dispatcher};
pub use executor::Executor;
pub use orchestrator::Orchestrator;
pub use registry::Registry;
pub use remote::{RemoteModelExecutor, RemoteSpec, DEFAULT_MODEL};
pub use session::Session;
