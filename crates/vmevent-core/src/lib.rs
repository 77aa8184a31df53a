//! Core trap monitoring functionality.
//!
//! A hypervisor that supports introspection lets an external monitoring
//! consumer subscribe to a class of guest traps. When a monitored trap
//! occurs, the trapping vCPU's register state is snapshotted into an event
//! request, the request is handed to a transport, and the vCPU is held until
//! the consumer replies with an event response that may carry a modified
//! register state.
//!
//! This crate provides the architecture-generic pieces: the [`Architecture`]
//! trait seam, the per-domain [monitor flag state machine], and the
//! [`TrapDispatcher`]. Architecture crates supply the register state types
//! and the snapshot codec.
//!
//! [monitor flag state machine]: Domain::set_monitor

pub mod arch;
mod dispatch;
mod domain;
mod error;
mod event;
mod monitor;

#[cfg(test)]
mod testing;

pub use self::{
    arch::{Architecture, TrapClass, TrapClassSet},
    dispatch::{EventSink, TrapDispatcher, TrapOutcome},
    domain::{Domain, DomainControl, DomainId, Vcpu, VcpuId, VcpuRunState},
    error::VmeError,
    event::{TrapEvent, TrapEventFlags, TrapEventResponse, TrapEventResponseFlags},
    monitor::{MonitorConfig, MonitorState},
};
