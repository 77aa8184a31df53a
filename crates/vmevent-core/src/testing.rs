//! Shared fixtures for the crate's unit tests.

use std::cell::{Cell, RefCell};

use crate::{
    Architecture, DomainControl, EventSink, TrapClassSet, TrapEvent, VmeError,
};

/// Live register state of the test architecture.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TestRegisters {
    pub counter: u64,
    pub flags: u64,
}

/// Register snapshot of the test architecture.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TestSnapshot {
    pub counter: u64,
    pub flags: u64,
}

/// A minimal architecture supporting only privileged-call monitoring.
#[derive(Debug, Clone, Copy)]
pub struct TestArch;

impl Architecture for TestArch {
    type Registers = TestRegisters;
    type RegisterSet = TestSnapshot;

    const CAPABILITIES: TrapClassSet = TrapClassSet::PRIVILEGED_CALL;

    fn capture(registers: &TestRegisters) -> TestSnapshot {
        TestSnapshot {
            counter: registers.counter,
            flags: registers.flags,
        }
    }

    fn apply(set: &TestSnapshot, registers: &mut TestRegisters) -> Result<(), VmeError> {
        registers.counter = set.counter;
        registers.flags = set.flags;
        Ok(())
    }
}

/// Records quiesce calls and asserts they are balanced.
#[derive(Debug, Default)]
pub struct TestControl {
    pub pauses: Cell<u32>,
    pub unpauses: Cell<u32>,
    pub paused: Cell<bool>,
    pub fail_pause: Cell<bool>,
}

impl DomainControl for TestControl {
    fn pause(&self) -> Result<(), VmeError> {
        if self.fail_pause.get() {
            return Err(VmeError::Other("pause failed"));
        }

        assert!(!self.paused.get(), "nested domain pause");
        self.paused.set(true);
        self.pauses.set(self.pauses.get() + 1);
        Ok(())
    }

    fn unpause(&self) -> Result<(), VmeError> {
        assert!(self.paused.get(), "unpause without pause");
        self.paused.set(false);
        self.unpauses.set(self.unpauses.get() + 1);
        Ok(())
    }
}

/// Collects emitted trap event requests.
#[derive(Debug, Default)]
pub struct TestSink {
    pub events: RefCell<Vec<TrapEvent<TestArch>>>,
    pub fail: Cell<bool>,
}

impl EventSink<TestArch> for TestSink {
    fn emit(&self, event: &TrapEvent<TestArch>) -> Result<(), VmeError> {
        if self.fail.get() {
            return Err(VmeError::Other("event ring full"));
        }

        self.events.borrow_mut().push(*event);
        Ok(())
    }
}
