/// The saved PSTATE/CPSR of a vCPU.
///
/// Only the execution-state bit is interpreted here; the remainder of the
/// value is carried through the snapshot codec untouched.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cpsr(pub u64);

impl Cpsr {
    /// M[4] — set when the vCPU executes in AArch32 state.
    pub const AARCH32: u64 = 1 << 4;

    /// Mode bits for AArch64 EL1 with the EL1 stack pointer (EL1h).
    pub const MODE_EL1H: u64 = 0b0101;

    /// Mode bits for AArch32 supervisor mode (SVC).
    pub const MODE_SVC: u64 = 0b1_0011;

    /// Checks whether the vCPU executes in AArch32 state.
    pub fn is_aarch32(self) -> bool {
        self.0 & Self::AARCH32 != 0
    }

    /// Returns the execution width selected by the mode bits.
    pub fn width(self) -> ExecutionWidth {
        if self.is_aarch32() {
            ExecutionWidth::Aarch32
        } else {
            ExecutionWidth::Aarch64
        }
    }
}

impl From<u64> for Cpsr {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Cpsr> for u64 {
    fn from(value: Cpsr) -> Self {
        value.0
    }
}

/// The architectural mode a vCPU is currently running in, determining which
/// register file layout applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionWidth {
    /// 32-bit execution state.
    Aarch32,

    /// 64-bit execution state.
    Aarch64,
}
