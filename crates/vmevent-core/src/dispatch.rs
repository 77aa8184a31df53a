use crate::{
    Architecture, Domain, TrapClass, TrapEvent, TrapEventFlags, TrapEventResponse, VcpuId,
    VcpuRunState, VmeError,
};

/// Transport hand-off for trap event requests.
///
/// The transport is assumed reliable and in-order; queuing and backpressure
/// are its concern. [`emit`] is fire-and-forget — the matching response
/// comes back later through [`TrapDispatcher::deliver_response`].
///
/// [`emit`]: EventSink::emit
pub trait EventSink<Arch>
where
    Arch: Architecture + ?Sized,
{
    /// Hands a trap event request to the transport.
    fn emit(&self, event: &TrapEvent<Arch>) -> Result<(), VmeError>;
}

/// Outcome of a monitored trap occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapOutcome {
    /// Monitoring is disabled; the trap falls through to ordinary handling.
    Passthrough,

    /// A request was emitted; the vCPU must not resume guest execution until
    /// the matching response arrives or the request is cancelled.
    Forwarded,
}

/// Routes monitored traps to the event transport.
///
/// The dispatcher reads the domain's monitor flag, snapshots the trapping
/// vCPU's registers into a fixed-size request and hands it off by reference;
/// nothing on this path allocates.
pub struct TrapDispatcher<S> {
    sink: S,
}

impl<S> TrapDispatcher<S> {
    /// Creates a new dispatcher over the given transport sink.
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Returns a reference to the transport sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Handles an occurrence of a privileged hardware-management call.
    pub fn on_privileged_call<Arch>(
        &self,
        domain: &mut Domain<Arch>,
        vcpu_id: VcpuId,
    ) -> Result<TrapOutcome, VmeError>
    where
        Arch: Architecture + ?Sized,
        S: EventSink<Arch>,
    {
        self.on_trap(domain, vcpu_id, TrapClass::PrivilegedCall)
    }

    /// Handles an occurrence of a monitored trap.
    ///
    /// With monitoring disabled this costs one flag read and constructs
    /// nothing. With monitoring enabled, a request carrying the trap class,
    /// the vCPU id and a full register snapshot is emitted, and the vCPU is
    /// marked [`VcpuRunState::WaitingForResponse`]. If the sink rejects the
    /// request, the vCPU is left running and the error is propagated.
    ///
    /// A class outside [`Architecture::CAPABILITIES`] cannot have a flag
    /// configuration and must have been filtered by the control plane.
    pub fn on_trap<Arch>(
        &self,
        domain: &mut Domain<Arch>,
        vcpu_id: VcpuId,
        class: TrapClass,
    ) -> Result<TrapOutcome, VmeError>
    where
        Arch: Architecture + ?Sized,
        S: EventSink<Arch>,
    {
        if !Arch::CAPABILITIES.contains(class.as_set()) {
            debug_assert!(
                false,
                "trap class without a flag configuration reached the dispatcher"
            );
            return Err(VmeError::Unsupported);
        }

        if !domain.monitor().enabled(class) {
            return Ok(TrapOutcome::Passthrough);
        }

        let domain_id = domain.id();
        let vcpu = domain.vcpu_mut(vcpu_id).ok_or(VmeError::VcpuNotFound)?;

        let event = TrapEvent::new(
            vcpu_id,
            TrapEventFlags::VCPU_PAUSED,
            class,
            Arch::capture(vcpu.registers()),
        );

        self.sink.emit(&event)?;
        vcpu.set_run_state(VcpuRunState::WaitingForResponse);

        tracing::trace!(domain = %domain_id, vcpu = %vcpu_id, %class, "trap event forwarded");

        Ok(TrapOutcome::Forwarded)
    }

    /// Applies a consumer response and resumes the awaiting vCPU.
    ///
    /// The response is matched to the vCPU by id; a vCPU that is not
    /// awaiting a response fails with [`VmeError::NoPendingEvent`]. A
    /// response whose register snapshot disagrees with the vCPU's current
    /// execution width is rejected and the vCPU stays suspended, awaiting
    /// either a well-formed response or [`cancel`].
    ///
    /// [`cancel`]: Self::cancel
    pub fn deliver_response<Arch>(
        &self,
        domain: &mut Domain<Arch>,
        vcpu_id: VcpuId,
        response: TrapEventResponse<Arch>,
    ) -> Result<(), VmeError>
    where
        Arch: Architecture + ?Sized,
    {
        let domain_id = domain.id();
        let vcpu = domain.vcpu_mut(vcpu_id).ok_or(VmeError::VcpuNotFound)?;

        if vcpu.run_state() != VcpuRunState::WaitingForResponse {
            return Err(VmeError::NoPendingEvent);
        }

        if let Some(registers) = &response.registers {
            Arch::apply(registers, vcpu.registers_mut())?;
        }

        vcpu.set_run_state(VcpuRunState::Running);

        tracing::trace!(domain = %domain_id, vcpu = %vcpu_id, "trap event response applied");

        Ok(())
    }

    /// Unblocks a vCPU awaiting a response without touching its state.
    ///
    /// For transport failure or domain teardown — the suspend point must
    /// never hang indefinitely.
    pub fn cancel<Arch>(&self, domain: &mut Domain<Arch>, vcpu_id: VcpuId) -> Result<(), VmeError>
    where
        Arch: Architecture + ?Sized,
    {
        let domain_id = domain.id();
        let vcpu = domain.vcpu_mut(vcpu_id).ok_or(VmeError::VcpuNotFound)?;

        if vcpu.run_state() != VcpuRunState::WaitingForResponse {
            return Err(VmeError::NoPendingEvent);
        }

        vcpu.set_run_state(VcpuRunState::Running);

        tracing::debug!(domain = %domain_id, vcpu = %vcpu_id, "pending trap event cancelled");

        Ok(())
    }
}
