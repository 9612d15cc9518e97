//! Headless GPU device acquisition.
//!
//! The handler never owns a GPU context; the host does. This module exists for
//! hosts and tools that have no window (offline shader checks, batch export)
//! and still need a device/queue pair to link programs against.

mod headless;
mod init;

pub use headless::HeadlessGpu;
pub use init::GpuInit;
