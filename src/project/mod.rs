//! Project location and workspace mount planning

pub mod location;
pub mod mounts;

pub use location::{looks_local, resolve, ProjectLocation, ProjectMode, MANIFEST_FILE, VENDOR_DIR};
pub use mounts::{discover_links, plan_mounts, LinkedPackage, MountEntry, MountPlan, EXT_ROOT};
