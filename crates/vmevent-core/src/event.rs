use crate::{Architecture, TrapClass, VcpuId};

bitflags::bitflags! {
    /// Flags that can be set in a trap event request.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct TrapEventFlags: u8 {
        /// The virtual CPU is paused awaiting the response.
        const VCPU_PAUSED = 1 << 0;
    }
}

/// A trap event request handed to the monitoring consumer.
///
/// Constructed fresh on every monitored trap — each request is a
/// point-in-time snapshot, never pooled or reused — and consumed exactly
/// once when the matching [`TrapEventResponse`] is applied.
#[derive(Debug, Clone, Copy)]
pub struct TrapEvent<Arch>
where
    Arch: Architecture + ?Sized,
{
    /// The ID of the virtual CPU where the trap occurred.
    vcpu_id: VcpuId,

    /// Flags associated with the event.
    flags: TrapEventFlags,

    /// The trap class that caused the event.
    reason: TrapClass,

    /// The CPU register state at the time of the trap.
    registers: Arch::RegisterSet,
}

impl<Arch> TrapEvent<Arch>
where
    Arch: Architecture + ?Sized,
{
    /// Creates a new trap event.
    pub fn new(
        vcpu_id: VcpuId,
        flags: TrapEventFlags,
        reason: TrapClass,
        registers: Arch::RegisterSet,
    ) -> Self {
        Self {
            vcpu_id,
            flags,
            reason,
            registers,
        }
    }

    /// Returns the ID of the virtual CPU where the trap occurred.
    pub fn vcpu_id(&self) -> VcpuId {
        self.vcpu_id
    }

    /// Returns flags associated with the event.
    pub fn flags(&self) -> TrapEventFlags {
        self.flags
    }

    /// Returns the trap class that caused the event.
    pub fn reason(&self) -> TrapClass {
        self.reason
    }

    /// Returns a reference to the register snapshot taken at the trap.
    pub fn registers(&self) -> &Arch::RegisterSet {
        &self.registers
    }
}

bitflags::bitflags! {
    /// Flags that can be set in a trap event response.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct TrapEventResponseFlags: u8 {
        /// Deny the monitored operation instead of completing it.
        const DENY = 1 << 0;
    }
}

/// A response to a trap event.
#[derive(Debug)]
pub struct TrapEventResponse<Arch>
where
    Arch: Architecture + ?Sized,
{
    /// Flags associated with the response.
    pub flags: TrapEventResponseFlags,

    /// The register state to apply to the vCPU before it resumes.
    pub registers: Option<Arch::RegisterSet>,
}

impl<Arch> Default for TrapEventResponse<Arch>
where
    Arch: Architecture + ?Sized,
{
    fn default() -> Self {
        Self {
            flags: TrapEventResponseFlags::empty(),
            registers: None,
        }
    }
}

impl<Arch> TrapEventResponse<Arch>
where
    Arch: Architecture + ?Sized,
{
    /// Creates a response to deny the monitored operation.
    pub fn deny() -> Self {
        Self::default().and_deny()
    }

    /// Creates a response to set a specific register state.
    pub fn set_registers(registers: Arch::RegisterSet) -> Self {
        Self::default().and_set_registers(registers)
    }

    /// Adds the deny flag to the response.
    pub fn and_deny(self) -> Self {
        Self {
            flags: self.flags | TrapEventResponseFlags::DENY,
            ..self
        }
    }

    /// Sets a specific register state for the response.
    pub fn and_set_registers(self, registers: Arch::RegisterSet) -> Self {
        Self {
            registers: Some(registers),
            ..self
        }
    }
}
