use core::ptr::{addr_of_mut, NonNull};

use super::{counter::Counter, ControlBlock};

/// Counter and payload in one allocation.
pub struct Inplace<T> {
    counter: Counter,
    payload: T,
}

impl<T> Inplace<T> {
    #[inline(always)]
    pub const fn new(count: usize, payload: T) -> Self {
        Self {
            counter: Counter::new(count),
            payload,
        }
    }
    /// The address of the embedded payload.
    ///
    /// # Safety
    ///
    /// `block` must point to a live `Inplace<T>`.
    #[inline(always)]
    pub unsafe fn payload(block: NonNull<Self>) -> NonNull<T> {
        NonNull::new_unchecked(addr_of_mut!((*block.as_ptr()).payload))
    }
}

impl<T> ControlBlock for Inplace<T> {
    #[inline(always)]
    fn counter(&self) -> &Counter {
        &self.counter
    }
    fn dispose(self: Box<Self>) {
        log::trace!("disposing inplace control block at {:p}", self);
    }
}

#[cfg(test)]
mod test {
    use core::cell::Cell;
    use std::rc::Rc;

    use wasm_bindgen_test::wasm_bindgen_test;

    use crate::{
        ptr::block::{BlockRef, ControlBlock},
        suites::fixtures::{CtorMock, DropMock},
    };

    use super::Inplace;

    #[test]
    #[wasm_bindgen_test]
    fn test_ctor() {
        let counter = Cell::new(0);
        let (block, _) = BlockRef::alloc(Inplace::new(8, CtorMock::new(&counter)));
        unsafe {
            assert_eq!(block.count(), 8);
            block.dispose();
        }
        assert_eq!(counter.get(), 1);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_payload() {
        let (block, raw) = BlockRef::alloc(Inplace::new(1, 42u64));
        unsafe {
            let payload = Inplace::payload(raw);
            assert_eq!(*payload.as_ref(), 42);
            assert_eq!(payload.as_ptr(), &mut (*raw.as_ptr()).payload as *mut u64);
            block.dispose();
        }
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_dispose() {
        let counter = Rc::new(Cell::new(0));
        let block: Box<dyn ControlBlock> = Box::new(Inplace::new(8, DropMock::new(&counter)));
        block.dispose();
        assert_eq!(counter.get(), 1);
    }
}
