// Cell holding the running engine for the frame callback and DOM listeners.
//
// Free of web types so host-side tests can include this file.

use std::cell::{Cell, RefCell};

pub struct EngineSlot<T> {
    value: RefCell<Option<T>>,
    closed: Cell<bool>,
}

impl<T> Default for EngineSlot<T> {
    fn default() -> Self {
        Self {
            value: RefCell::new(None),
            closed: Cell::new(false),
        }
    }
}

impl<T> EngineSlot<T> {
    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    /// Store the value. Hands it back when the slot is closed or busy.
    pub fn put(&self, value: T) -> Result<(), T> {
        if self.is_closed() {
            return Err(value);
        }
        match self.value.try_borrow_mut() {
            Ok(mut slot) => {
                *slot = Some(value);
                Ok(())
            }
            Err(_) => Err(value),
        }
    }

    /// Run `f` on the stored value. Does nothing once closed or while
    /// another call holds the value. Returns whether `f` ran.
    pub fn with(&self, f: impl FnOnce(&mut T)) -> bool {
        if self.is_closed() {
            return false;
        }
        let Ok(mut slot) = self.value.try_borrow_mut() else {
            return false;
        };
        match slot.as_mut() {
            Some(value) => {
                f(value);
                true
            }
            None => false,
        }
    }

    /// Close the slot. Returns whether this was the first close.
    pub fn close(&self) -> bool {
        !self.closed.replace(true)
    }

    /// Take the value out of a closed slot, if it is not borrowed.
    ///
    /// A close that lands while the value is borrowed leaves it in place;
    /// the next caller of this picks it up.
    pub fn take_if_closed(&self) -> Option<T> {
        if !self.is_closed() {
            return None;
        }
        self.value.try_borrow_mut().ok().and_then(|mut slot| slot.take())
    }
}
