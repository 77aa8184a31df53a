use crate::Cpsr;

/// Live register state of one ARM vCPU, as saved by the hypervisor at the
/// trap.
///
/// The layout is the AArch64 EL2 view. A vCPU in AArch32 state aliases
/// r0–r12 onto the low halves of x0–x12, its banked sp onto x13 and its
/// link register onto x14; the upper halves are architecturally unknown
/// after AArch32 execution.
///
/// The two translation-table bases are cached shadow copies of the EL1
/// system registers — the vCPU may not be resident on a physical CPU, so
/// register writes land here rather than in hardware.
#[expect(missing_docs)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub x: [u64; 31],
    pub sp_el0: u64,
    pub sp_el1: u64,
    pub pc: u64,
    pub cpsr: Cpsr,
    pub spsr_el1: u64,

    pub ttbr0_el1: u64,
    pub ttbr1_el1: u64,
}
