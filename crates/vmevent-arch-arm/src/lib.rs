//! ARM architecture support for hypervisor VM events.
//!
//! An ARM domain may run its vCPUs in either of two execution widths —
//! AArch32 and AArch64 — with disjoint register files, so the register
//! snapshot carried by a trap event is a tagged union over the two widths.
//! The hypervisor itself runs at EL2 in AArch64 state; AArch32 guest
//! registers alias the low halves of the x registers.

mod cpsr;
mod registers;
mod register_set;
mod wire;

pub use self::{
    cpsr::{Cpsr, ExecutionWidth},
    register_set::{Aarch32RegisterSet, Aarch64RegisterSet, RegisterSet},
    registers::Registers,
    wire::WIRE_VERSION,
};

use vmevent_core::{Architecture, TrapClassSet, VmeError};

/// The ARM architecture.
#[derive(Debug, Clone, Copy)]
pub struct Arm;

impl Architecture for Arm {
    type Registers = Registers;
    type RegisterSet = RegisterSet;

    const CAPABILITIES: TrapClassSet =
        TrapClassSet::PRIVILEGED_CALL.union(TrapClassSet::GUEST_REQUEST);

    fn capture(registers: &Registers) -> RegisterSet {
        RegisterSet::capture(registers)
    }

    fn apply(set: &RegisterSet, registers: &mut Registers) -> Result<(), VmeError> {
        set.apply(registers)
    }
}
