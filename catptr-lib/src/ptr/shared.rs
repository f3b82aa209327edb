use core::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    mem,
    ops::Deref,
    ptr::{null, NonNull},
};

use super::{
    addr,
    block::{BlockRef, Inplace, Separate},
    cast::{cast_checked, Dynamic, Upcast},
    exclusive::ExclusiveRef,
    non_owning::NonOwningRef,
    null_deref,
};

struct Pair<T: ?Sized> {
    block: BlockRef,
    payload: NonNull<T>,
}

impl<T: ?Sized> Clone for Pair<T> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Pair<T> {}

/// Shared ownership of a value through a counted control block.
///
/// Every non-empty `SharedRef` holds one count on its block. The block and the value are
/// released by the last one. Re-typed references (`upcast`, `as_checked_shared`) share the
/// block of their source.
///
/// The count is not atomic, so a `SharedRef` never leaves its thread.
///
/// ```compile_fail
/// use catptr_lib::ptr::SharedRef;
/// fn send<T: Send>(_: T) {}
/// send(SharedRef::new(5));
/// ```
pub struct SharedRef<T: ?Sized> {
    pair: Option<Pair<T>>,
    _0: PhantomData<T>,
}

impl<T: 'static> SharedRef<T> {
    /// Allocates `value` together with its control block.
    pub fn new(value: T) -> Self {
        let (block, raw) = BlockRef::alloc(Inplace::new(0, value));
        unsafe { Self::associate(block, Inplace::payload(raw)) }
    }
}

impl<T: ?Sized + 'static> SharedRef<T> {
    /// Adopts an existing allocation. The control block is allocated separately.
    pub fn from_box(value: Box<T>) -> Self {
        let (block, raw) = BlockRef::alloc(Separate::new(0, value));
        unsafe { Self::associate(block, raw.as_ref().payload()) }
    }
    /// # Safety
    ///
    /// A non-null `ptr` must come from `Box::into_raw` and must not be owned by anything else.
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        match NonNull::new(ptr) {
            Some(p) => Self::from_box(Box::from_raw(p.as_ptr())),
            None => Self::null(),
        }
    }
    /// Converts sole ownership into shared ownership. A null `ExclusiveRef` gives an empty
    /// `SharedRef`.
    pub fn from_exclusive(value: ExclusiveRef<T>) -> Self {
        match value.into_box() {
            Some(value) => Self::from_box(value),
            None => Self::null(),
        }
    }
}

impl<T: ?Sized> SharedRef<T> {
    #[inline(always)]
    pub const fn null() -> Self {
        Self {
            pair: None,
            _0: PhantomData,
        }
    }
    /// # Safety
    ///
    /// `block` must be alive and must keep `payload` alive.
    unsafe fn associate(block: BlockRef, payload: NonNull<T>) -> Self {
        block.increment();
        Self {
            pair: Some(Pair { block, payload }),
            _0: PhantomData,
        }
    }
    /// The number of `SharedRef`s sharing the block. `0` if empty.
    pub fn count(&self) -> usize {
        self.pair.map_or(0, |p| unsafe { p.block.count() })
    }
    #[inline(always)]
    pub fn get(&self) -> Option<NonNull<T>> {
        self.pair.map(|p| p.payload)
    }
    /// The data address of the payload, or null.
    #[inline(always)]
    pub fn addr(&self) -> *const () {
        addr(self.get())
    }
    #[inline(always)]
    fn block_addr(&self) -> *const () {
        self.pair.map_or(null(), |p| p.block.addr())
    }
    #[inline(always)]
    pub const fn is_null(&self) -> bool {
        self.pair.is_none()
    }
    #[inline(always)]
    pub fn as_ref(&self) -> Option<&T> {
        self.pair.map(|p| unsafe { p.payload.as_ref() })
    }
    /// A view of the payload. The count is not affected.
    #[inline(always)]
    pub fn non_owning(&self) -> NonOwningRef<T> {
        NonOwningRef::from_option(self.get())
    }
    /// Moves the pair out, leaving `self` empty. The count is not affected.
    #[inline(always)]
    pub fn take(&mut self) -> Self {
        Self {
            pair: self.pair.take(),
            _0: PhantomData,
        }
    }
    /// Releases the pair, if any, and becomes empty.
    pub fn reset(&mut self) {
        if let Some(p) = self.pair.take() {
            unsafe { p.block.decrement() };
        }
    }
    /// Shares `other`'s pair. The new pair is counted before the old one is released, so
    /// assigning a reference to the same block never drops its count to zero.
    pub fn set(&mut self, other: &Self) {
        if let Some(p) = other.pair {
            unsafe { p.block.increment() };
        }
        if let Some(p) = mem::replace(&mut self.pair, other.pair) {
            unsafe { p.block.decrement() };
        }
    }
    #[inline(always)]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.pair, &mut other.pair)
    }
    pub fn as_checked<U: ?Sized + 'static>(&self) -> NonOwningRef<U>
    where
        T: Dynamic,
    {
        unsafe { self.non_owning().as_checked() }
    }
    #[inline(always)]
    pub fn as_unchecked<U>(&self) -> NonOwningRef<U> {
        self.non_owning().as_unchecked()
    }
    fn retype<U: ?Sized>(
        &self,
        cast: impl FnOnce(NonNull<T>) -> Option<NonNull<U>>,
    ) -> SharedRef<U> {
        let pair = self
            .pair
            .and_then(|p| cast(p.payload).map(|payload| (p.block, payload)));
        match pair {
            Some((block, payload)) => unsafe { SharedRef::associate(block, payload) },
            None => SharedRef::null(),
        }
    }
    /// A `SharedRef<U>` sharing this block if the dynamic type of the payload allows it,
    /// otherwise an empty one. `self` is not affected either way.
    pub fn as_checked_shared<U: ?Sized + 'static>(&self) -> SharedRef<U>
    where
        T: Dynamic,
    {
        self.retype(|p| unsafe { cast_checked(p) })
    }
    /// # Safety
    ///
    /// The payload must be a `U`.
    pub unsafe fn as_unchecked_shared<U>(&self) -> SharedRef<U> {
        self.retype(|p| Some(p.cast()))
    }
    /// A reference of a base type sharing this block. Never fails.
    pub fn upcast<U: ?Sized>(&self) -> SharedRef<U>
    where
        T: Upcast<U>,
    {
        self.retype(|p| Some(<T as Upcast<U>>::upcast(p)))
    }
}

impl<T: ?Sized> Clone for SharedRef<T> {
    fn clone(&self) -> Self {
        match self.pair {
            Some(p) => unsafe { Self::associate(p.block, p.payload) },
            None => Self::null(),
        }
    }
    fn clone_from(&mut self, source: &Self) {
        self.set(source)
    }
}

impl<T: ?Sized> Drop for SharedRef<T> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T: ?Sized> Default for SharedRef<T> {
    #[inline(always)]
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ?Sized + 'static> From<Box<T>> for SharedRef<T> {
    fn from(value: Box<T>) -> Self {
        Self::from_box(value)
    }
}

impl<T: ?Sized + 'static> From<ExclusiveRef<T>> for SharedRef<T> {
    fn from(value: ExclusiveRef<T>) -> Self {
        Self::from_exclusive(value)
    }
}

impl<T: ?Sized> Deref for SharedRef<T> {
    type Target = T;
    fn deref(&self) -> &T {
        match self.as_ref() {
            Some(value) => value,
            None => null_deref("SharedRef"),
        }
    }
}

impl<T: ?Sized> PartialEq for SharedRef<T> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.block_addr() == other.block_addr()
    }
}

impl<T: ?Sized> Eq for SharedRef<T> {}

impl<T: ?Sized> Hash for SharedRef<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.block_addr().hash(state)
    }
}

impl<T: ?Sized> fmt::Debug for SharedRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedRef")
            .field("block", &self.block_addr())
            .field("payload", &self.addr())
            .field("count", &self.count())
            .finish()
    }
}
