use crate::{Architecture, MonitorConfig, VmeError};

/// A domain identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DomainId(pub u16);

impl std::fmt::Display for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A virtual CPU identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VcpuId(pub u16);

impl std::fmt::Display for VcpuId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quiesce interface to the scheduler owning a domain.
///
/// [`pause`] must stop every vCPU of the domain from making further guest
/// progress before returning; [`unpause`] lifts that. Flag transitions are
/// bracketed by this pair, which makes the flag write and the trap-path flag
/// read mutually exclusive in wall-clock time — the only synchronization the
/// monitor flags rely on.
///
/// [`pause`]: DomainControl::pause
/// [`unpause`]: DomainControl::unpause
pub trait DomainControl {
    /// Pauses all vCPUs of the domain.
    fn pause(&self) -> Result<(), VmeError>;

    /// Resumes all vCPUs of the domain.
    fn unpause(&self) -> Result<(), VmeError>;
}

/// Scheduling state of a vCPU with respect to event monitoring.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum VcpuRunState {
    /// The vCPU is free to execute guest code.
    #[default]
    Running,

    /// A trap event request was emitted for this vCPU; it must not resume
    /// guest execution until the matching response arrives or the request
    /// is cancelled.
    WaitingForResponse,
}

/// A single schedulable execution thread within a domain.
#[derive(Debug)]
pub struct Vcpu<Arch>
where
    Arch: Architecture + ?Sized,
{
    id: VcpuId,
    registers: Arch::Registers,
    run_state: VcpuRunState,
}

impl<Arch> Vcpu<Arch>
where
    Arch: Architecture + ?Sized,
{
    /// Creates a new vCPU with default register state.
    pub fn new(id: VcpuId) -> Self {
        Self {
            id,
            registers: Default::default(),
            run_state: VcpuRunState::Running,
        }
    }

    /// Returns the vCPU identifier.
    pub fn id(&self) -> VcpuId {
        self.id
    }

    /// Returns a reference to the live register state.
    pub fn registers(&self) -> &Arch::Registers {
        &self.registers
    }

    /// Returns a mutable reference to the live register state.
    pub fn registers_mut(&mut self) -> &mut Arch::Registers {
        &mut self.registers
    }

    /// Returns the scheduling state of this vCPU.
    pub fn run_state(&self) -> VcpuRunState {
        self.run_state
    }

    pub(crate) fn set_run_state(&mut self, run_state: VcpuRunState) {
        self.run_state = run_state;
    }
}

/// An isolated guest execution context managed by the hypervisor.
///
/// Owns its vCPUs and its monitoring configuration; the configuration lives
/// exactly as long as the domain.
#[derive(Debug)]
pub struct Domain<Arch>
where
    Arch: Architecture + ?Sized,
{
    id: DomainId,
    vcpus: Vec<Vcpu<Arch>>,
    monitor: MonitorConfig,
}

impl<Arch> Domain<Arch>
where
    Arch: Architecture + ?Sized,
{
    /// Creates a new domain with the given number of vCPUs, all monitoring
    /// disabled.
    pub fn new(id: DomainId, vcpus: u16) -> Self {
        Self {
            id,
            vcpus: (0..vcpus).map(|id| Vcpu::new(VcpuId(id))).collect(),
            monitor: MonitorConfig::default(),
        }
    }

    /// Returns the domain identifier.
    pub fn id(&self) -> DomainId {
        self.id
    }

    /// Returns the vCPU with the given identifier.
    pub fn vcpu(&self, id: VcpuId) -> Option<&Vcpu<Arch>> {
        self.vcpus.iter().find(|vcpu| vcpu.id() == id)
    }

    /// Returns the vCPU with the given identifier.
    pub fn vcpu_mut(&mut self, id: VcpuId) -> Option<&mut Vcpu<Arch>> {
        self.vcpus.iter_mut().find(|vcpu| vcpu.id() == id)
    }

    /// Returns an iterator over the domain's vCPUs.
    pub fn vcpus(&self) -> impl Iterator<Item = &Vcpu<Arch>> {
        self.vcpus.iter()
    }

    /// Returns the monitoring configuration.
    pub fn monitor(&self) -> &MonitorConfig {
        &self.monitor
    }

    pub(crate) fn monitor_mut(&mut self) -> &mut MonitorConfig {
        &mut self.monitor
    }
}
