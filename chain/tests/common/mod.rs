//! Recording mocks of the HAL traits shared by the integration tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spi_shift_chain::hal::{GpioPin, HalError, HalResult, Level, PinMode, SpiConfig, SpiMaster};

/// One observable hardware interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Mode(PinMode),
    Latch(Level),
    Begin(SpiConfig),
    Transfer(u8),
    End,
}

/// Shared, ordered log of events from the bus and the latch
#[derive(Clone, Default)]
pub struct Recorder(Rc<RefCell<Vec<Event>>>);

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn transfers(&self) -> Vec<u8> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Transfer(byte) => Some(*byte),
                _ => None,
            })
            .collect()
    }

    pub fn position(&self, event: Event) -> Option<usize> {
        self.0.borrow().iter().position(|e| *e == event)
    }

    pub fn rposition(&self, event: Event) -> Option<usize> {
        self.0.borrow().iter().rposition(|e| *e == event)
    }
}

pub struct MockBus {
    recorder: Recorder,
    fail_after: Option<usize>,
    transferred: usize,
}

impl MockBus {
    pub fn new(recorder: &Recorder) -> Self {
        Self {
            recorder: recorder.clone(),
            fail_after: None,
            transferred: 0,
        }
    }

    /// Fail every transfer once `count` bytes went through.
    pub fn failing_after(recorder: &Recorder, count: usize) -> Self {
        Self {
            fail_after: Some(count),
            ..Self::new(recorder)
        }
    }
}

impl SpiMaster for MockBus {
    fn begin_transaction(&mut self, config: &SpiConfig) -> HalResult<()> {
        self.recorder.push(Event::Begin(*config));
        Ok(())
    }

    fn transfer(&mut self, byte: u8) -> HalResult<u8> {
        if self.fail_after.is_some_and(|limit| self.transferred >= limit) {
            return Err(HalError::HardwareError);
        }
        self.transferred += 1;
        self.recorder.push(Event::Transfer(byte));
        Ok(0)
    }

    fn end_transaction(&mut self) -> HalResult<()> {
        self.recorder.push(Event::End);
        Ok(())
    }
}

pub struct MockLatch {
    recorder: Recorder,
    number: u32,
    level: Option<Level>,
    mode: Option<PinMode>,
    failing: Cell<bool>,
}

impl MockLatch {
    pub fn new(recorder: &Recorder, number: u32) -> Self {
        Self {
            recorder: recorder.clone(),
            number,
            level: None,
            mode: None,
            failing: Cell::new(false),
        }
    }

    /// Level last driven on the line, `None` if never driven
    pub fn level(&self) -> Option<Level> {
        self.level
    }

    pub fn mode(&self) -> Option<PinMode> {
        self.mode
    }

    /// Make every following write fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }
}

impl GpioPin for MockLatch {
    fn set_mode(&mut self, mode: PinMode) -> HalResult<()> {
        self.mode = Some(mode);
        self.recorder.push(Event::Mode(mode));
        Ok(())
    }

    fn write(&mut self, level: Level) -> HalResult<()> {
        if self.failing.get() {
            return Err(HalError::HardwareError);
        }
        self.level = Some(level);
        self.recorder.push(Event::Latch(level));
        Ok(())
    }

    fn pin_number(&self) -> u32 {
        self.number
    }
}

/// Bus, latch on pin 5 and the recorder they share
pub fn hardware() -> (MockBus, MockLatch, Recorder) {
    let recorder = Recorder::new();
    (MockBus::new(&recorder), MockLatch::new(&recorder, 5), recorder)
}
