use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use thrust::config::{CALIBRATE_VAR, SOFT_KILL_VAR};
use thrust::hal::{Registry, SharedVar};
use thrust::{Error, MountPosition};

#[derive(Clone, Copy)]
enum Value {
    Float(f32),
    Bool(bool),
}

pub struct Slot {
    name: &'static str,
    value: Mutex<CriticalSectionRawMutex, Cell<Value>>,
}

impl Slot {
    const fn float(name: &'static str) -> Self {
        Slot {
            name,
            value: Mutex::new(Cell::new(Value::Float(0.0))),
        }
    }

    const fn bool(name: &'static str) -> Self {
        Slot {
            name,
            value: Mutex::new(Cell::new(Value::Bool(false))),
        }
    }

    fn get(&self) -> Value {
        self.value.lock(|v| v.get())
    }
}

static SLOTS: [Slot; 8] = [
    Slot::bool(SOFT_KILL_VAR),
    Slot::bool(CALIBRATE_VAR),
    Slot::float(MountPosition::Right.var_name()),
    Slot::float(MountPosition::FrontRight.var_name()),
    Slot::float(MountPosition::FrontLeft.var_name()),
    Slot::float(MountPosition::Left.var_name()),
    Slot::float(MountPosition::BackLeft.var_name()),
    Slot::float(MountPosition::BackRight.var_name()),
];

/// Vehicle-wide control bus. All values start at rest: switches off, no thrust.
pub struct Shm;

impl Registry for Shm {
    type Var = Var;

    fn var(&self, name: &'static str) -> Result<Var, Error> {
        SLOTS
            .iter()
            .find(|slot| slot.name == name)
            .map(Var)
            .ok_or(Error::UnknownVariable(name))
    }
}

#[derive(Clone, Copy)]
pub struct Var(&'static Slot);

impl SharedVar for Var {
    fn get_float(&self) -> f32 {
        match self.0.get() {
            Value::Float(value) => value,
            Value::Bool(value) => f32::from(u8::from(value)),
        }
    }

    fn get_bool(&self) -> bool {
        match self.0.get() {
            Value::Bool(value) => value,
            Value::Float(value) => value != 0.0,
        }
    }

    fn set(&self, value: bool) {
        self.0.value.lock(|v| v.set(Value::Bool(value)));
    }
}
