//! Version artifact generation engine
//!
//! One run is one synchronous pass: read the previous run's sidecar state,
//! ask the configured policy whether the tracked version changed, and if so
//! render the new artifact and hand it to the publisher. The engine itself
//! holds no state between runs; the sidecar is the only memory.

pub mod driver;
pub mod error;
pub mod policy;
pub mod publisher;
pub mod reader;
pub mod simple;
pub mod snapshot;
pub mod template;
pub mod tracked;
pub mod types;
