//! Simulated register file for host tests.
//!
//! Unwritten addresses read as zero. Reads can be scripted per address to
//! play back hardware status changes (FIFO levels, done flags); once a script
//! runs dry the address falls back to its stored value. Every access is
//! logged in order.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use crate::reg::Bus;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Read(u32, u32),
    Write(u32, u32),
}

#[derive(Default)]
struct State {
    cells: BTreeMap<u32, u32>,
    scripts: BTreeMap<u32, VecDeque<u32>>,
    log: Vec<Access>,
}

/// Handles are cheap clones sharing one register file, so several drivers
/// can sit on the same simulated chip.
#[derive(Clone, Default)]
pub struct SimBus(Rc<RefCell<State>>);

impl SimBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a register without logging an access.
    pub fn preset(&self, addr: u32, val: u32) {
        self.0.borrow_mut().cells.insert(addr, val);
    }

    /// Values returned by the next reads of `addr`, in order.
    pub fn script(&self, addr: u32, values: &[u32]) {
        self.0
            .borrow_mut()
            .scripts
            .entry(addr)
            .or_default()
            .extend(values.iter().copied());
    }

    /// Current stored value, not logged.
    pub fn peek(&self, addr: u32) -> u32 {
        self.0.borrow().cells.get(&addr).copied().unwrap_or(0)
    }

    pub fn log(&self) -> Vec<Access> {
        self.0.borrow().log.clone()
    }

    pub fn clear_log(&self) {
        self.0.borrow_mut().log.clear();
    }

    pub fn writes(&self) -> Vec<(u32, u32)> {
        self.log()
            .into_iter()
            .filter_map(|a| match a {
                Access::Write(addr, val) => Some((addr, val)),
                Access::Read(..) => None,
            })
            .collect()
    }

    pub fn writes_to(&self, addr: u32) -> Vec<u32> {
        self.writes()
            .into_iter()
            .filter(|&(a, _)| a == addr)
            .map(|(_, v)| v)
            .collect()
    }

    pub fn reads_of(&self, addr: u32) -> usize {
        self.log()
            .iter()
            .filter(|a| matches!(a, Access::Read(r, _) if *r == addr))
            .count()
    }

    /// Position in the log of the first write to `addr`.
    pub fn first_write(&self, addr: u32) -> Option<usize> {
        self.log()
            .iter()
            .position(|a| matches!(a, Access::Write(w, _) if *w == addr))
    }
}

impl Bus for SimBus {
    fn read(&self, addr: u32) -> u32 {
        let mut state = self.0.borrow_mut();
        let scripted = state.scripts.get_mut(&addr).and_then(|q| q.pop_front());
        let val = scripted.unwrap_or_else(|| state.cells.get(&addr).copied().unwrap_or(0));
        state.log.push(Access::Read(addr, val));
        val
    }

    fn write(&mut self, addr: u32, val: u32) {
        let mut state = self.0.borrow_mut();
        state.cells.insert(addr, val);
        state.log.push(Access::Write(addr, val));
    }
}
