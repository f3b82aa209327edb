use core::{marker::PhantomData, ptr::NonNull};

use super::{counter::Counter, ControlBlock};

/// Counts a payload that lives in its own allocation.
pub struct Separate<T: ?Sized> {
    counter: Counter,
    payload: NonNull<T>,
    _0: PhantomData<Box<T>>,
}

impl<T: ?Sized> Separate<T> {
    pub fn new(count: usize, payload: Box<T>) -> Self {
        Self {
            counter: Counter::new(count),
            // SAFETY: `Box::into_raw` never returns null.
            payload: unsafe { NonNull::new_unchecked(Box::into_raw(payload)) },
            _0: PhantomData,
        }
    }
    #[inline(always)]
    pub fn payload(&self) -> NonNull<T> {
        self.payload
    }
}

#[cfg(test)]
std::thread_local! {
    /// Separate blocks released on this thread.
    pub(crate) static RELEASED: core::cell::Cell<usize> = const { core::cell::Cell::new(0) };
}

#[cfg(test)]
impl<T: ?Sized> Drop for Separate<T> {
    fn drop(&mut self) {
        RELEASED.with(|r| r.set(r.get() + 1));
    }
}

impl<T: ?Sized> ControlBlock for Separate<T> {
    #[inline(always)]
    fn counter(&self) -> &Counter {
        &self.counter
    }
    fn dispose(self: Box<Self>) {
        log::trace!("disposing separate control block at {:p}", self);
        drop(unsafe { Box::from_raw(self.payload.as_ptr()) });
    }
}
