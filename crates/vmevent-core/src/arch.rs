//! The architecture seam.
//!
//! The core crate never touches individual registers. An architecture crate
//! implements [`Architecture`], providing the live register state type, the
//! width-tagged snapshot type, the codec between them, and the compile-time
//! bitmap of trap classes the architecture can monitor.

use std::fmt::Debug;

use crate::VmeError;

bitflags::bitflags! {
    /// Bitmap of trap classes an architecture supports monitoring for.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct TrapClassSet: u32 {
        /// Privileged hardware-management calls.
        const PRIVILEGED_CALL = 1 << 0;

        /// Events requested explicitly by the guest.
        const GUEST_REQUEST = 1 << 1;
    }
}

/// A class of guest traps that can be monitored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrapClass {
    /// A privileged hardware-management call (SMC on ARM).
    PrivilegedCall,

    /// An event requested explicitly by the guest.
    GuestRequest,
}

impl TrapClass {
    /// Returns the capability bit corresponding to this trap class.
    pub fn as_set(self) -> TrapClassSet {
        match self {
            Self::PrivilegedCall => TrapClassSet::PRIVILEGED_CALL,
            Self::GuestRequest => TrapClassSet::GUEST_REQUEST,
        }
    }
}

impl std::fmt::Display for TrapClass {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::PrivilegedCall => write!(f, "privileged-call"),
            Self::GuestRequest => write!(f, "guest-request"),
        }
    }
}

/// Defines an interface for CPU architecture-specific register handling.
///
/// The trap path only ever moves whole register states around; the compiler
/// guarantees — through the associated types — that a snapshot is never
/// interpreted against the wrong architecture.
pub trait Architecture {
    /// The live register state of one vCPU, as saved by the hypervisor at
    /// the trap.
    type Registers: Debug + Default + Clone + Copy;

    /// A point-in-time snapshot of [`Registers`], tagged with the execution
    /// width it was captured under.
    ///
    /// [`Registers`]: Self::Registers
    type RegisterSet: Debug + Clone + Copy + PartialEq;

    /// The trap classes this architecture can monitor.
    ///
    /// Consulted before every flag transition; a request for a class outside
    /// this set is rejected before any state is touched.
    const CAPABILITIES: TrapClassSet;

    /// Snapshots the live register state.
    ///
    /// Pure and total: selects the snapshot variant matching the current
    /// execution width and transcribes every field of that variant.
    fn capture(registers: &Self::Registers) -> Self::RegisterSet;

    /// Applies a snapshot to the live register state in place.
    ///
    /// Selects the branch matching the *target's* current execution width.
    /// Fails with [`VmeError::WidthMismatch`] if the snapshot was captured
    /// under the other width; the target is left untouched in that case.
    fn apply(set: &Self::RegisterSet, registers: &mut Self::Registers) -> Result<(), VmeError>;
}
