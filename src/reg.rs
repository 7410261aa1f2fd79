//! Register Access Layer
//! =====================
//!
//! Every peripheral on the ESP32-C3 is a block of 32-bit registers at a fixed
//! physical address. Drivers in this crate never dereference those addresses
//! themselves: they go through a [`Bus`], which is either the real memory map
//! ([`Mmio`]) or a simulated register file used by the unit tests.
//!
//! Bit fields are described by a [`Field`] (shift + width). Updating a field
//! is a pure function, [`field_set`], so a read-modify-write never touches
//! bits outside the field.

use core::ptr::{read_volatile, write_volatile};

// ============================================================================
// BUS
// ============================================================================

/// Word-wide access to the peripheral address space.
///
/// Implementations must perform exactly one 32-bit access per call, without
/// caching, merging or reordering relative to other calls.
pub trait Bus {
    fn read(&self, addr: u32) -> u32;

    fn write(&mut self, addr: u32, val: u32);

    /// One read followed by one write of `f(old)`.
    #[inline(always)]
    fn modify<F: FnOnce(u32) -> u32>(&mut self, addr: u32, f: F) {
        let val = self.read(addr);
        self.write(addr, f(val));
    }

    #[inline(always)]
    fn set_bits(&mut self, addr: u32, bits: u32) {
        self.modify(addr, |v| v | bits);
    }

    #[inline(always)]
    fn clear_bits(&mut self, addr: u32, bits: u32) {
        self.modify(addr, |v| v & !bits);
    }

    #[inline(always)]
    fn write_field(&mut self, addr: u32, field: Field, value: u32) {
        self.modify(addr, |v| field_set(v, field, value));
    }

    #[inline(always)]
    fn read_field(&self, addr: u32, field: Field) -> u32 {
        field_get(self.read(addr), field)
    }
}

impl<B: Bus + ?Sized> Bus for &mut B {
    #[inline(always)]
    fn read(&self, addr: u32) -> u32 {
        (**self).read(addr)
    }

    #[inline(always)]
    fn write(&mut self, addr: u32, val: u32) {
        (**self).write(addr, val)
    }
}

/// The real memory-mapped register space.
#[derive(Clone, Copy, Debug)]
pub struct Mmio(());

impl Mmio {
    /// # Safety
    /// Only valid on the ESP32-C3 itself. Every address handed to the bus
    /// must be a documented register of that chip.
    pub unsafe fn new() -> Self {
        Mmio(())
    }
}

impl Bus for Mmio {
    #[inline(always)]
    fn read(&self, addr: u32) -> u32 {
        unsafe { read_volatile(addr as usize as *const u32) }
    }

    #[inline(always)]
    fn write(&mut self, addr: u32, val: u32) {
        unsafe { write_volatile(addr as usize as *mut u32, val) }
    }
}

// ============================================================================
// BIT FIELDS
// ============================================================================

/// A bit field inside a 32-bit register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub shift: u32,
    pub width: u32,
}

impl Field {
    pub const fn new(shift: u32, width: u32) -> Self {
        assert!(width > 0 && shift + width <= 32, "field does not fit in a 32-bit register");
        Field { shift, width }
    }

    /// Largest value the field can hold.
    pub const fn max(self) -> u32 {
        if self.width == 32 {
            u32::MAX
        } else {
            (1 << self.width) - 1
        }
    }

    /// The field's bits in register position.
    pub const fn mask(self) -> u32 {
        self.max() << self.shift
    }

    /// `value` truncated to the field width and shifted into place.
    pub const fn bits(self, value: u32) -> u32 {
        (value & self.max()) << self.shift
    }
}

/// Replace `field` inside `reg` with `value`, keeping every other bit.
pub const fn field_set(reg: u32, field: Field, value: u32) -> u32 {
    (reg & !field.mask()) | field.bits(value)
}

/// Extract `field` from `reg`.
pub const fn field_get(reg: u32, field: Field) -> u32 {
    (reg >> field.shift) & field.max()
}

// ============================================================================
// STATUS POLLING
// ============================================================================

/// How long a driver keeps polling a hardware status flag.
///
/// Firmware always runs with [`Spin::Forever`]: a flag that never asserts is
/// a hang, exactly like the hardware. [`Spin::AtMost`] exists so simulated
/// registers can be polled without wedging a test.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Spin {
    #[default]
    Forever,
    AtMost(u32),
}

impl Spin {
    /// Poll `ready` until it returns true. Returns false only when an
    /// `AtMost` budget runs out.
    #[inline]
    pub fn wait<F: FnMut() -> bool>(self, mut ready: F) -> bool {
        match self {
            Spin::Forever => {
                while !ready() {
                    core::hint::spin_loop();
                }
                true
            }
            Spin::AtMost(limit) => {
                for _ in 0..limit {
                    if ready() {
                        return true;
                    }
                    core::hint::spin_loop();
                }
                false
            }
        }
    }
}
