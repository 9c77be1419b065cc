//! Orchestration of the cross compilation container
//!
//! - `invocation`: assembles mounts, environment and package argument
//! - `engine` / `docker`: engine checks, image pulls, container launch
//! - `runner`: executes an invocation with forwarded output

mod docker;
mod engine;
pub mod invocation;
pub mod runner;

pub use docker::DockerEngine;
pub use engine::ContainerEngine;
pub use invocation::{assemble, ExecutionMode, InvocationSpec};
