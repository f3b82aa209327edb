use core::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    ops::{Deref, DerefMut},
    ptr::NonNull,
};

use super::{
    addr,
    cast::{Dynamic, Upcast},
    null_deref,
    non_owning::NonOwningRef,
};

/// Sole ownership of a heap allocated value.
///
/// There is no `Clone`: at most one `ExclusiveRef` holds a given address.
///
/// ```compile_fail
/// use catptr_lib::ptr::ExclusiveRef;
/// struct Token;
/// let a = ExclusiveRef::new(Token);
/// let b: ExclusiveRef<Token> = Clone::clone(&a);
/// ```
pub struct ExclusiveRef<T: ?Sized> {
    ptr: Option<NonNull<T>>,
    _0: PhantomData<Box<T>>,
}

impl<T> ExclusiveRef<T> {
    /// Allocates `value` and takes ownership of it.
    #[inline(always)]
    pub fn new(value: T) -> Self {
        Self::from_box(Box::new(value))
    }
}

impl<T: ?Sized> ExclusiveRef<T> {
    #[inline(always)]
    const fn from_option(ptr: Option<NonNull<T>>) -> Self {
        Self {
            ptr,
            _0: PhantomData,
        }
    }
    #[inline(always)]
    pub const fn null() -> Self {
        Self::from_option(None)
    }
    #[inline(always)]
    pub fn from_box(value: Box<T>) -> Self {
        unsafe { Self::from_raw(Box::into_raw(value)) }
    }
    /// Adopts `ptr`. A null `ptr` gives a null reference.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must come from `Box::into_raw` and must not be owned by anything else.
    #[inline(always)]
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        Self::from_option(NonNull::new(ptr))
    }
    /// Gives up ownership as a `Box`, or `None` if the reference is null.
    pub fn into_box(mut self) -> Option<Box<T>> {
        self.ptr
            .take()
            .map(|p| unsafe { Box::from_raw(p.as_ptr()) })
    }
    /// Gives up ownership of the address. The caller becomes responsible for releasing it,
    /// e.g. with `Box::from_raw`.
    #[inline(always)]
    pub fn into_raw(mut self) -> Option<NonNull<T>> {
        self.ptr.take()
    }
    #[inline(always)]
    pub const fn get(&self) -> Option<NonNull<T>> {
        self.ptr
    }
    #[inline(always)]
    pub fn addr(&self) -> *const () {
        addr(self.ptr)
    }
    #[inline(always)]
    pub const fn is_null(&self) -> bool {
        self.ptr.is_none()
    }
    #[inline(always)]
    pub fn as_ref(&self) -> Option<&T> {
        self.ptr.map(|p| unsafe { p.as_ref() })
    }
    #[inline(always)]
    pub fn as_mut(&mut self) -> Option<&mut T> {
        self.ptr.map(|mut p| unsafe { p.as_mut() })
    }
    /// A view of the owned value. Ownership is not affected.
    #[inline(always)]
    pub fn non_owning(&self) -> NonOwningRef<T> {
        NonOwningRef::from_option(self.ptr)
    }
    /// Moves ownership out, leaving `self` null.
    #[inline(always)]
    pub fn take(&mut self) -> Self {
        Self::from_option(self.ptr.take())
    }
    /// Releases the owned value, if any.
    pub fn reset(&mut self) {
        if let Some(p) = self.ptr.take() {
            drop(unsafe { Box::from_raw(p.as_ptr()) });
        }
    }
    /// Releases the owned value, if any, and takes over `other`'s.
    pub fn replace(&mut self, mut other: Self) {
        self.reset();
        self.ptr = other.ptr.take();
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
    /// Transfers ownership to an `ExclusiveRef<U>` if the dynamic type of the value allows it.
    ///
    /// On failure `self` keeps the value and a null reference is returned.
    pub fn retype_checked<U: ?Sized + 'static>(&mut self) -> ExclusiveRef<U>
    where
        T: Dynamic,
    {
        let result = self.as_checked::<U>().get();
        if result.is_some() {
            self.ptr = None;
        }
        ExclusiveRef::from_option(result)
    }
    /// Transfers ownership to an `ExclusiveRef<U>` unconditionally.
    ///
    /// # Safety
    ///
    /// The value must be a `U`.
    pub unsafe fn retype_unchecked<U>(&mut self) -> ExclusiveRef<U> {
        ExclusiveRef::from_option(self.ptr.take().map(NonNull::cast))
    }
    /// Converts to a reference of a base type. Never fails.
    pub fn upcast<U: ?Sized>(mut self) -> ExclusiveRef<U>
    where
        T: Upcast<U>,
    {
        ExclusiveRef::from_option(self.ptr.take().map(<T as Upcast<U>>::upcast))
    }
}

impl<T: ?Sized> Drop for ExclusiveRef<T> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T: ?Sized> Default for ExclusiveRef<T> {
    #[inline(always)]
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ?Sized> From<Box<T>> for ExclusiveRef<T> {
    #[inline(always)]
    fn from(value: Box<T>) -> Self {
        Self::from_box(value)
    }
}

impl<T: ?Sized> Deref for ExclusiveRef<T> {
    type Target = T;
    fn deref(&self) -> &T {
        match self.as_ref() {
            Some(value) => value,
            None => null_deref("ExclusiveRef"),
        }
    }
}

impl<T: ?Sized> DerefMut for ExclusiveRef<T> {
    fn deref_mut(&mut self) -> &mut T {
        match self.as_mut() {
            Some(value) => value,
            None => null_deref("ExclusiveRef"),
        }
    }
}

impl<T: ?Sized> PartialEq for ExclusiveRef<T> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl<T: ?Sized> Eq for ExclusiveRef<T> {}

impl<T: ?Sized> Hash for ExclusiveRef<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state)
    }
}

impl<T: ?Sized> fmt::Debug for ExclusiveRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ExclusiveRef").field(&self.addr()).finish()
    }
}

#[cfg(test)]
mod test {
    use core::{cell::Cell, ptr::null};
    use std::rc::Rc;

    use wasm_bindgen_test::wasm_bindgen_test;

    use crate::suites::fixtures::{
        DropMock, DropMockBase, Geometry, Line, LineBase, Point2, PointBase,
    };

    use super::ExclusiveRef;

    #[test]
    #[wasm_bindgen_test]
    fn test_null() {
        let ptr = ExclusiveRef::<i32>::null();
        assert!(ptr.is_null());
        assert_eq!(ptr.addr(), null());
        assert_eq!(ptr, ExclusiveRef::default());
        assert!(ptr.into_box().is_none());
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_new() {
        let mut ptr = ExclusiveRef::new(0);
        assert!(!ptr.is_null());
        *ptr += 3;
        assert_eq!(*ptr, 3);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_take() {
        let counter = Rc::new(Cell::new(0));
        let mut a = ExclusiveRef::new(DropMock::new(&counter));
        let address = a.addr();
        let b = a.take();
        assert!(a.is_null());
        assert_eq!(b.addr(), address);
        drop(a);
        assert_eq!(counter.get(), 0);
        drop(b);
        assert_eq!(counter.get(), 1);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_reset() {
        let counter = Rc::new(Cell::new(0));
        let mut a = ExclusiveRef::new(DropMock::new(&counter));
        a.reset();
        assert!(a.is_null());
        assert_eq!(counter.get(), 1);
        a.reset();
        assert_eq!(counter.get(), 1);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_replace() {
        let counter = Rc::new(Cell::new(0));
        let mut a = ExclusiveRef::new(DropMock::new(&counter));
        let b = ExclusiveRef::new(DropMock::new(&counter));
        let address = b.addr();
        a.replace(b);
        assert_eq!(counter.get(), 1);
        assert_eq!(a.addr(), address);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_box() {
        let boxed = Box::new(11);
        let address: *const i32 = &*boxed;
        let ptr = ExclusiveRef::from(boxed);
        assert_eq!(ptr.addr(), address as *const ());
        let boxed = ptr.into_box();
        assert_eq!(boxed.as_deref(), Some(&11));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_into_raw() {
        let counter = Rc::new(Cell::new(0));
        let ptr = ExclusiveRef::new(DropMock::new(&counter));
        let address = ptr.addr();
        let raw = ptr.into_raw().unwrap();
        assert_eq!(counter.get(), 0);
        assert_eq!(raw.as_ptr() as *const (), address);
        drop(unsafe { ExclusiveRef::from_raw(raw.as_ptr()) });
        assert_eq!(counter.get(), 1);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_upcast() {
        let point = ExclusiveRef::new(Point2::new(-5, 5));
        let address = point.addr();
        let id = point.id();
        let geometry: ExclusiveRef<dyn Geometry> = point.upcast();
        assert_eq!(geometry.addr(), address);
        assert_eq!(geometry.id(), id);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_as_checked() {
        let ptr = ExclusiveRef::new(Point2::new(-5, 5));
        assert_eq!(ptr.as_checked::<dyn PointBase>().addr(), ptr.addr());
        assert_eq!(ptr.as_checked::<dyn Geometry>().addr(), ptr.addr());
        assert!(ptr.as_checked::<dyn LineBase>().is_null());
        assert!(ExclusiveRef::<Point2>::null()
            .as_checked::<dyn PointBase>()
            .is_null());
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_retype_checked() {
        let mut geometry: ExclusiveRef<dyn Geometry> =
            ExclusiveRef::new(Line::new(Point2::new(0, 0), Point2::new(2, 2))).upcast();
        let address = geometry.addr();
        let point = geometry.retype_checked::<Point2>();
        assert!(point.is_null());
        assert_eq!(geometry.addr(), address);
        let line = geometry.retype_checked::<Line>();
        assert!(geometry.is_null());
        assert_eq!(line.addr(), address);
        assert_eq!(line.p2.y, 2);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_retype_releases_once() {
        let counter = Rc::new(Cell::new(0));
        let mut mock = ExclusiveRef::new(DropMock::new(&counter));
        let base = mock.retype_checked::<dyn DropMockBase>();
        assert!(mock.is_null());
        drop(mock);
        assert_eq!(counter.get(), 0);
        drop(base);
        assert_eq!(counter.get(), 1);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_retype_unchecked() {
        let mut geometry: ExclusiveRef<dyn Geometry> = ExclusiveRef::new(Point2::new(4, 5)).upcast();
        let point = unsafe { geometry.retype_unchecked::<Point2>() };
        assert!(geometry.is_null());
        assert_eq!((point.x, point.y), (4, 5));
    }

    #[test]
    #[should_panic(expected = "null ExclusiveRef")]
    #[wasm_bindgen_test]
    fn test_null_deref() {
        let ptr = ExclusiveRef::<i32>::null();
        let _value: i32 = *ptr;
    }
}
