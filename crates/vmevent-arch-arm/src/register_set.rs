use vmevent_core::VmeError;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{Cpsr, ExecutionWidth, Registers};

/// Register snapshot of a vCPU in AArch32 state.
///
/// All architectural registers are 32-bit; the translation-table bases are
/// the 64-bit EL1 view, shared across both execution widths of a domain.
#[expect(missing_docs)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct Aarch32RegisterSet {
    /// r0–r12; r11 is the frame pointer.
    pub r: [u32; 13],
    pub sp: u32,
    pub lr: u32,
    pub pc: u32,
    pub cpsr: u32,
    pub spsr: u32,

    pub ttbr0: u64,
    pub ttbr1: u64,
}

/// Register snapshot of a vCPU in AArch64 state.
#[expect(missing_docs)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct Aarch64RegisterSet {
    /// x0–x30; x29 is the frame pointer, x30 the link register.
    pub x: [u64; 31],
    pub sp_el0: u64,
    pub sp_el1: u64,
    pub pc: u64,
    pub cpsr: u64,
    pub spsr_el1: u64,

    pub ttbr0_el1: u64,
    pub ttbr1_el1: u64,
}

/// A point-in-time snapshot of one vCPU's architectural registers, tagged
/// with the execution width it was captured under.
///
/// Constructed fresh on every trap and consumed exactly once when the
/// matching response is applied. The tag always matches the owning vCPU's
/// execution width at the moment of capture; [`apply`] enforces the same
/// agreement on the way back in.
///
/// [`apply`]: Self::apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterSet {
    /// Captured from a vCPU in AArch32 state.
    Aarch32(Aarch32RegisterSet),

    /// Captured from a vCPU in AArch64 state.
    Aarch64(Aarch64RegisterSet),
}

impl RegisterSet {
    /// Returns the execution width this snapshot was captured under.
    pub fn width(&self) -> ExecutionWidth {
        match self {
            Self::Aarch32(_) => ExecutionWidth::Aarch32,
            Self::Aarch64(_) => ExecutionWidth::Aarch64,
        }
    }

    /// Snapshots the live register state.
    ///
    /// Selects the variant from the live `cpsr` and transcribes every field
    /// of that variant; nothing is computed or derived. The translation-table
    /// bases are captured regardless of width. AArch32 capture truncates the
    /// aliased x registers to their architecturally visible low halves.
    pub fn capture(registers: &Registers) -> Self {
        match registers.cpsr.width() {
            ExecutionWidth::Aarch32 => Self::Aarch32(Aarch32RegisterSet {
                r: std::array::from_fn(|i| registers.x[i] as u32),
                sp: registers.x[13] as u32,
                lr: registers.x[14] as u32,
                pc: registers.pc as u32,
                cpsr: registers.cpsr.0 as u32,
                spsr: registers.spsr_el1 as u32,
                ttbr0: registers.ttbr0_el1,
                ttbr1: registers.ttbr1_el1,
            }),
            ExecutionWidth::Aarch64 => Self::Aarch64(Aarch64RegisterSet {
                x: registers.x,
                sp_el0: registers.sp_el0,
                sp_el1: registers.sp_el1,
                pc: registers.pc,
                cpsr: registers.cpsr.0,
                spsr_el1: registers.spsr_el1,
                ttbr0_el1: registers.ttbr0_el1,
                ttbr1_el1: registers.ttbr1_el1,
            }),
        }
    }

    /// Applies this snapshot to the live register state in place.
    ///
    /// The branch is selected by the *target's* current execution width —
    /// the state the response will be interpreted against at resume time. A
    /// snapshot captured under the other width (a domain that changed width
    /// between trap and response, or a malformed response) is rejected with
    /// [`VmeError::WidthMismatch`] and the target is left untouched.
    ///
    /// Every field of the matching variant is written. AArch32 values are
    /// zero-extended into the x registers; registers outside the AArch32
    /// file (x15–x30, the EL banked stack pointers) are not touched by a
    /// narrow snapshot. The translation-table bases land in the cached
    /// shadow copies.
    pub fn apply(&self, registers: &mut Registers) -> Result<(), VmeError> {
        match (self, registers.cpsr.width()) {
            (Self::Aarch32(set), ExecutionWidth::Aarch32) => {
                for (i, r) in set.r.iter().enumerate() {
                    registers.x[i] = u64::from(*r);
                }
                registers.x[13] = u64::from(set.sp);
                registers.x[14] = u64::from(set.lr);
                registers.pc = u64::from(set.pc);
                registers.cpsr = Cpsr(u64::from(set.cpsr));
                registers.spsr_el1 = u64::from(set.spsr);
                registers.ttbr0_el1 = set.ttbr0;
                registers.ttbr1_el1 = set.ttbr1;
                Ok(())
            }
            (Self::Aarch64(set), ExecutionWidth::Aarch64) => {
                registers.x = set.x;
                registers.sp_el0 = set.sp_el0;
                registers.sp_el1 = set.sp_el1;
                registers.pc = set.pc;
                registers.cpsr = Cpsr(set.cpsr);
                registers.spsr_el1 = set.spsr_el1;
                registers.ttbr0_el1 = set.ttbr0_el1;
                registers.ttbr1_el1 = set.ttbr1_el1;
                Ok(())
            }
            _ => Err(VmeError::WidthMismatch),
        }
    }
}
