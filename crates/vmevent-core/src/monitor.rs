use crate::{Architecture, Domain, DomainControl, TrapClass, VmeError};

/// State of one (domain, trap class) monitor flag.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Traps of the class are handled by ordinary logic only.
    #[default]
    Disabled,

    /// Traps of the class are forwarded to the monitoring consumer.
    Enabled,
}

/// Per-domain monitoring configuration: one flag per trap class.
///
/// The flags are deliberately not exposed for direct mutation; the only way
/// to change one is the quiesce-scoped transition in [`Domain::set_monitor`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MonitorConfig {
    privileged_call: MonitorState,
    guest_request: MonitorState,
}

impl MonitorConfig {
    /// Returns the flag state for the given trap class.
    pub fn state(&self, class: TrapClass) -> MonitorState {
        match class {
            TrapClass::PrivilegedCall => self.privileged_call,
            TrapClass::GuestRequest => self.guest_request,
        }
    }

    /// Returns whether monitoring is enabled for the given trap class.
    pub fn enabled(&self, class: TrapClass) -> bool {
        self.state(class) == MonitorState::Enabled
    }

    fn set(&mut self, class: TrapClass, state: MonitorState) {
        match class {
            TrapClass::PrivilegedCall => self.privileged_call = state,
            TrapClass::GuestRequest => self.guest_request = state,
        }
    }
}

impl<Arch> Domain<Arch>
where
    Arch: Architecture + ?Sized,
{
    /// Enables or disables monitoring of a trap class for this domain.
    ///
    /// The request is validated before anything else happens: a class
    /// outside [`Architecture::CAPABILITIES`] fails with
    /// [`VmeError::Unsupported`], and a request for the state the flag is
    /// already in fails with [`VmeError::AlreadyEnabled`] or
    /// [`VmeError::AlreadyDisabled`]. Neither rejection quiesces the domain.
    /// Idempotent calls are rejected, not absorbed — callers are expected to
    /// track their desired state, and a state conflict is a logic error on
    /// their side.
    ///
    /// The flag write itself is bracketed by [`DomainControl::pause`] and
    /// [`DomainControl::unpause`], so no trapping vCPU of this domain can
    /// observe a transition in flight.
    pub fn set_monitor(
        &mut self,
        control: &impl DomainControl,
        class: TrapClass,
        enable: bool,
    ) -> Result<(), VmeError> {
        if !Arch::CAPABILITIES.contains(class.as_set()) {
            return Err(VmeError::Unsupported);
        }

        let requested = if enable {
            MonitorState::Enabled
        } else {
            MonitorState::Disabled
        };

        if self.monitor().state(class) == requested {
            return Err(match requested {
                MonitorState::Enabled => VmeError::AlreadyEnabled,
                MonitorState::Disabled => VmeError::AlreadyDisabled,
            });
        }

        control.pause()?;
        self.monitor_mut().set(class, requested);
        control.unpause()?;

        tracing::debug!(domain = %self.id(), %class, enable, "monitor flag updated");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Domain, DomainId, MonitorState, TrapClass, VmeError,
        testing::{TestArch, TestControl},
    };

    fn domain() -> Domain<TestArch> {
        Domain::new(DomainId(1), 2)
    }

    #[test]
    fn enable_quiesces_exactly_once() {
        let mut domain = domain();
        let control = TestControl::default();

        domain
            .set_monitor(&control, TrapClass::PrivilegedCall, true)
            .unwrap();

        assert_eq!(
            domain.monitor().state(TrapClass::PrivilegedCall),
            MonitorState::Enabled
        );
        assert_eq!(control.pauses.get(), 1);
        assert_eq!(control.unpauses.get(), 1);
        assert!(!control.paused.get());
    }

    #[test]
    fn enable_twice_is_rejected() {
        let mut domain = domain();
        let control = TestControl::default();

        domain
            .set_monitor(&control, TrapClass::PrivilegedCall, true)
            .unwrap();

        let result = domain.set_monitor(&control, TrapClass::PrivilegedCall, true);
        assert!(matches!(result, Err(VmeError::AlreadyEnabled)));

        // The flag must remain enabled and the second call must not have
        // quiesced the domain again.
        assert!(domain.monitor().enabled(TrapClass::PrivilegedCall));
        assert_eq!(control.pauses.get(), 1);
    }

    #[test]
    fn disable_requires_enabled() {
        let mut domain = domain();
        let control = TestControl::default();

        let result = domain.set_monitor(&control, TrapClass::PrivilegedCall, false);
        assert!(matches!(result, Err(VmeError::AlreadyDisabled)));
        assert_eq!(control.pauses.get(), 0);

        domain
            .set_monitor(&control, TrapClass::PrivilegedCall, true)
            .unwrap();
        domain
            .set_monitor(&control, TrapClass::PrivilegedCall, false)
            .unwrap();

        assert_eq!(
            domain.monitor().state(TrapClass::PrivilegedCall),
            MonitorState::Disabled
        );
        assert_eq!(control.pauses.get(), 2);
        assert_eq!(control.unpauses.get(), 2);
    }

    #[test]
    fn unsupported_class_never_quiesces() {
        // `TestArch` supports only privileged calls.
        let mut domain = domain();
        let control = TestControl::default();

        let result = domain.set_monitor(&control, TrapClass::GuestRequest, true);
        assert!(matches!(result, Err(VmeError::Unsupported)));

        assert!(!domain.monitor().enabled(TrapClass::GuestRequest));
        assert_eq!(control.pauses.get(), 0);
        assert_eq!(control.unpauses.get(), 0);
    }

    #[test]
    fn pause_failure_leaves_flag_unchanged() {
        let mut domain = domain();
        let control = TestControl::default();
        control.fail_pause.set(true);

        let result = domain.set_monitor(&control, TrapClass::PrivilegedCall, true);
        assert!(result.is_err());

        assert!(!domain.monitor().enabled(TrapClass::PrivilegedCall));
        assert_eq!(control.unpauses.get(), 0);
    }
}
