//! xgo - CGO cross compilation front end
//!
//! Resolves a Go project (module or GOPATH based), plans the mounts and
//! environment for the xgo build image, caches CGO dependency archives and
//! launches the build either through a container engine or directly when
//! already running inside the image.

pub mod build;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod orchestration;
pub mod project;

pub use error::{XgoError, XgoResult};
