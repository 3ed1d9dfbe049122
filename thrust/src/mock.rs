//! In-memory fakes of the hardware and control bus contracts.
//!
//! Every side effect lands in one shared [`Journal`] so tests can check the
//! ordering across ESCs, storage and delays.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;

use crate::config::MountPosition;
use crate::hal::{EscOutput, NvStorage, Registry, SharedVar};
use crate::Error;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    Attach(usize),
    Pulse(usize, u16),
    StorageWrite(u16, bool),
    Delay(u32),
}

#[derive(Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Event>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn last(&self) -> Option<Event> {
        self.0.borrow().last().copied()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Value {
    Float(f32),
    Bool(bool),
}

#[derive(Default)]
struct ShmState {
    values: HashMap<&'static str, Value>,
    lookups: Vec<&'static str>,
}

/// Control bus holding the switches and the six thrust values, all at rest.
#[derive(Clone)]
pub struct MockShm(Rc<RefCell<ShmState>>);

impl MockShm {
    pub fn new() -> Self {
        let mut state = ShmState::default();
        state.values.insert("switches.softKill", Value::Bool(false));
        state.values.insert("switches.calibrate", Value::Bool(false));
        for position in MountPosition::ALL {
            state.values.insert(position.var_name(), Value::Float(0.0));
        }
        MockShm(Rc::new(RefCell::new(state)))
    }

    pub fn set_bool(&self, name: &'static str, value: bool) {
        self.0.borrow_mut().values.insert(name, Value::Bool(value));
    }

    pub fn set_float(&self, name: &'static str, value: f32) {
        self.0.borrow_mut().values.insert(name, Value::Float(value));
    }

    pub fn get_bool(&self, name: &'static str) -> bool {
        self.lookup(name).get_bool()
    }

    pub fn lookup(&self, name: &'static str) -> MockVar {
        MockVar {
            name,
            shm: self.0.clone(),
        }
    }

    /// Names resolved through [`Registry::var`], in call order.
    pub fn lookups(&self) -> Vec<&'static str> {
        self.0.borrow().lookups.clone()
    }
}

impl Registry for MockShm {
    type Var = MockVar;

    fn var(&self, name: &'static str) -> Result<MockVar, Error> {
        let mut state = self.0.borrow_mut();
        if !state.values.contains_key(name) {
            return Err(Error::UnknownVariable(name));
        }
        state.lookups.push(name);
        Ok(self.lookup(name))
    }
}

#[derive(Clone)]
pub struct MockVar {
    name: &'static str,
    shm: Rc<RefCell<ShmState>>,
}

impl MockVar {
    fn value(&self) -> Value {
        self.shm.borrow().values[self.name]
    }
}

impl SharedVar for MockVar {
    fn get_float(&self) -> f32 {
        match self.value() {
            Value::Float(value) => value,
            Value::Bool(_) => panic!("{} is not a float", self.name),
        }
    }

    fn get_bool(&self) -> bool {
        match self.value() {
            Value::Bool(value) => value,
            Value::Float(_) => panic!("{} is not a bool", self.name),
        }
    }

    fn set(&self, value: bool) {
        self.shm
            .borrow_mut()
            .values
            .insert(self.name, Value::Bool(value));
    }
}

/// Single calibration cell; writes to any address are journaled.
#[derive(Clone)]
pub struct MockStorage {
    calibrated: Rc<RefCell<bool>>,
    journal: Journal,
}

impl MockStorage {
    pub fn new(journal: &Journal, calibrated: bool) -> Self {
        MockStorage {
            calibrated: Rc::new(RefCell::new(calibrated)),
            journal: journal.clone(),
        }
    }

    pub fn calibrated(&self) -> bool {
        *self.calibrated.borrow()
    }
}

impl NvStorage for MockStorage {
    fn read(&mut self, _address: u16) -> bool {
        *self.calibrated.borrow()
    }

    fn write(&mut self, address: u16, value: bool) {
        *self.calibrated.borrow_mut() = value;
        self.journal.push(Event::StorageWrite(address, value));
    }
}

pub struct MockEsc {
    id: usize,
    journal: Journal,
}

impl MockEsc {
    pub fn new(journal: &Journal, id: usize) -> Self {
        MockEsc {
            id,
            journal: journal.clone(),
        }
    }
}

impl EscOutput for MockEsc {
    fn attach(&mut self) {
        self.journal.push(Event::Attach(self.id));
    }

    fn write_microseconds(&mut self, pulse_us: u16) {
        self.journal.push(Event::Pulse(self.id, pulse_us));
    }
}

pub struct MockDelay {
    journal: Journal,
    raise: Option<MockVar>,
}

impl MockDelay {
    pub fn new(journal: &Journal) -> Self {
        MockDelay {
            journal: journal.clone(),
            raise: None,
        }
    }

    /// Turns `switch` on during the first wait, as an operator would.
    pub fn raising(journal: &Journal, switch: MockVar) -> Self {
        MockDelay {
            journal: journal.clone(),
            raise: Some(switch),
        }
    }

    fn wait(&mut self, ms: u32) {
        self.journal.push(Event::Delay(ms));
        if let Some(switch) = self.raise.take() {
            switch.set(true);
        }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.wait(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.wait(ms);
    }
}
