//! Register transfer and trap monitoring toggles for hypervisor VM events.
//!
//! This crate ties together the architecture-generic core — the per-domain
//! monitor flag state machine and the trap dispatcher — with architecture
//! support crates providing the register snapshot codec.
//!
//! See [`vmevent_core`] for the core types and [`arm`] for ARM support.

pub use vmevent_core::*;

/// ARM architecture support.
#[cfg(feature = "arch-arm")]
pub mod arm {
    pub use vmevent_arch_arm::*;
}
