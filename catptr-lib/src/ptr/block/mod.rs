mod counter;
mod inplace;
mod separate;

use core::ptr::NonNull;

#[cfg(test)]
pub(crate) use self::separate::RELEASED;
pub use self::{
    counter::{Counter, RefCounterUpdate},
    inplace::Inplace,
    separate::Separate,
};

/// The shared record behind a `SharedRef`: a strong count and the payload it keeps alive.
pub trait ControlBlock {
    fn counter(&self) -> &Counter;
    /// Releases the block together with its payload.
    fn dispose(self: Box<Self>);
}

/// A type-erased pointer to a heap allocated control block.
///
/// The block is self-owning: it is released by the `decrement` that takes its count to zero.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct BlockRef(NonNull<dyn ControlBlock>);

impl BlockRef {
    /// Moves `block` to the heap. Returns the erased pointer and the typed one.
    pub fn alloc<B: ControlBlock + 'static>(block: B) -> (Self, NonNull<B>) {
        // SAFETY: `Box::into_raw` never returns null.
        let raw = unsafe { NonNull::new_unchecked(Box::into_raw(Box::new(block))) };
        (Self(raw), raw)
    }
    #[inline(always)]
    pub fn addr(self) -> *const () {
        self.0.cast::<()>().as_ptr()
    }
    #[inline(always)]
    unsafe fn update(self, update: RefCounterUpdate) -> usize {
        self.0.as_ref().counter().update(update)
    }
    /// # Safety
    ///
    /// The block must be alive.
    #[inline(always)]
    pub unsafe fn count(self) -> usize {
        self.update(RefCounterUpdate::Read)
    }
    /// # Safety
    ///
    /// The block must be alive.
    #[inline(always)]
    pub unsafe fn increment(self) {
        self.update(RefCounterUpdate::AddRef);
    }
    /// Returns `true` if the count reached zero. The block is disposed then and must not be
    /// touched again.
    ///
    /// # Safety
    ///
    /// The block must be alive and its count must be positive.
    pub unsafe fn decrement(self) -> bool {
        if self.update(RefCounterUpdate::Release) == 1 {
            self.dispose();
            true
        } else {
            false
        }
    }
    /// # Safety
    ///
    /// The block must be alive and no other `BlockRef` may use it afterwards.
    pub unsafe fn dispose(self) {
        Box::from_raw(self.0.as_ptr()).dispose()
    }
}

#[cfg(test)]
mod test {
    use core::cell::Cell;
    use std::rc::Rc;

    use wasm_bindgen_test::wasm_bindgen_test;

    use crate::suites::fixtures::DropMock;

    use super::{BlockRef, Inplace, Separate};

    #[test]
    #[wasm_bindgen_test]
    fn test_increment() {
        let (block, _) = BlockRef::alloc(Inplace::new(8, 0));
        unsafe {
            block.increment();
            assert_eq!(block.count(), 9);
            block.dispose();
        }
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_decrement() {
        let counter = Rc::new(Cell::new(0));
        let (block, _) = BlockRef::alloc(Separate::new(7, Box::new(DropMock::new(&counter))));
        unsafe {
            assert!(!block.decrement());
            assert_eq!(block.count(), 6);
            block.dispose();
        }
        assert_eq!(counter.get(), 1);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_decrement_to_zero() {
        let counter = Rc::new(Cell::new(0));
        let (separate, _) = BlockRef::alloc(Separate::new(1, Box::new(DropMock::new(&counter))));
        assert!(unsafe { separate.decrement() });
        assert_eq!(counter.get(), 1);
        let (inplace, _) = BlockRef::alloc(Inplace::new(1, DropMock::new(&counter)));
        assert!(unsafe { inplace.decrement() });
        assert_eq!(counter.get(), 2);
    }
}
