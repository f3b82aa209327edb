use core::{
    fmt,
    hash::{Hash, Hasher},
    ptr::NonNull,
};

use super::{
    addr,
    cast::{cast_checked, Dynamic, Upcast},
};

/// A reference that observes an object without owning it.
///
/// It never releases its target and may dangle once the owner has released it. Reading through
/// it is therefore `unsafe`; comparing, copying and unchecked casts are not.
#[repr(transparent)]
pub struct NonOwningRef<T: ?Sized> {
    ptr: Option<NonNull<T>>,
}

impl<T: ?Sized> NonOwningRef<T> {
    #[inline(always)]
    pub const fn null() -> Self {
        Self { ptr: None }
    }
    #[inline(always)]
    pub const fn new(ptr: NonNull<T>) -> Self {
        Self { ptr: Some(ptr) }
    }
    #[inline(always)]
    pub(crate) const fn from_option(ptr: Option<NonNull<T>>) -> Self {
        Self { ptr }
    }
    #[inline(always)]
    pub fn from_raw(ptr: *mut T) -> Self {
        Self {
            ptr: NonNull::new(ptr),
        }
    }
    #[inline(always)]
    pub fn from_ref(value: &T) -> Self {
        Self::new(NonNull::from(value))
    }
    #[inline(always)]
    pub fn from_mut(value: &mut T) -> Self {
        Self::new(NonNull::from(value))
    }
    /// The address, without dereferencing it.
    #[inline(always)]
    pub const fn get(&self) -> Option<NonNull<T>> {
        self.ptr
    }
    /// The data address, or null.
    #[inline(always)]
    pub fn addr(&self) -> *const () {
        addr(self.ptr)
    }
    #[inline(always)]
    pub const fn is_null(&self) -> bool {
        self.ptr.is_none()
    }
    /// # Safety
    ///
    /// The target must be alive for `'a` and must not be mutated through another path meanwhile.
    #[inline(always)]
    pub unsafe fn as_ref<'a>(&self) -> Option<&'a T> {
        self.ptr.map(|p| p.as_ref())
    }
    /// # Safety
    ///
    /// The target must be alive for `'a` and must not be accessed through another path meanwhile.
    #[inline(always)]
    pub unsafe fn as_mut<'a>(&self) -> Option<&'a mut T> {
        self.ptr.map(|mut p| p.as_mut())
    }
    /// Moves the reference out, leaving `self` null.
    #[inline(always)]
    pub fn take(&mut self) -> Self {
        Self {
            ptr: self.ptr.take(),
        }
    }
    /// Views the target as `U` if its dynamic type allows it, otherwise returns null.
    ///
    /// # Safety
    ///
    /// A non-null target must be alive: its dynamic type is read.
    pub unsafe fn as_checked<U: ?Sized + 'static>(&self) -> NonOwningRef<U>
    where
        T: Dynamic,
    {
        NonOwningRef {
            ptr: self.ptr.and_then(|p| cast_checked(p)),
        }
    }
    /// Reinterprets the address as `U` without any check.
    #[inline(always)]
    pub fn as_unchecked<U>(&self) -> NonOwningRef<U> {
        NonOwningRef {
            ptr: self.ptr.map(NonNull::cast),
        }
    }
    #[inline(always)]
    pub fn upcast<U: ?Sized>(&self) -> NonOwningRef<U>
    where
        T: Upcast<U>,
    {
        NonOwningRef {
            ptr: self.ptr.map(<T as Upcast<U>>::upcast),
        }
    }
}

impl<T: ?Sized> Clone for NonOwningRef<T> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for NonOwningRef<T> {}

impl<T: ?Sized> Default for NonOwningRef<T> {
    #[inline(always)]
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ?Sized> From<&T> for NonOwningRef<T> {
    #[inline(always)]
    fn from(value: &T) -> Self {
        Self::from_ref(value)
    }
}

impl<T: ?Sized> From<&mut T> for NonOwningRef<T> {
    #[inline(always)]
    fn from(value: &mut T) -> Self {
        Self::from_mut(value)
    }
}

impl<T: ?Sized> PartialEq for NonOwningRef<T> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl<T: ?Sized> Eq for NonOwningRef<T> {}

impl<T: ?Sized> Hash for NonOwningRef<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state)
    }
}

impl<T: ?Sized> fmt::Debug for NonOwningRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NonOwningRef").field(&self.addr()).finish()
    }
}

#[cfg(test)]
mod test {
    use core::ptr::null;

    use wasm_bindgen_test::wasm_bindgen_test;

    use crate::suites::fixtures::{Geometry, Line, LineBase, Point2, PointBase};

    use super::NonOwningRef;

    #[test]
    #[wasm_bindgen_test]
    fn test_null() {
        let x = NonOwningRef::<i32>::null();
        assert!(x.is_null());
        assert_eq!(x.addr(), null());
        assert_eq!(x, NonOwningRef::default());
        assert!(unsafe { x.as_ref() }.is_none());
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_copy() {
        let mut val = 7;
        let a = NonOwningRef::from_mut(&mut val);
        let b = a;
        assert_eq!(a, b);
        unsafe { *b.as_mut().unwrap() += 1 };
        assert_eq!(unsafe { a.as_ref() }, Some(&8));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_take() {
        let val = 0;
        let mut a = NonOwningRef::from_ref(&val);
        let b = a.take();
        assert!(a.is_null());
        assert_eq!(b.addr(), &val as *const i32 as *const ());
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_upcast() {
        let point = Point2::new(-5, 5);
        let a = NonOwningRef::from_ref(&point);
        let b = a.upcast::<dyn Geometry>();
        assert_eq!(b.addr(), a.addr());
        assert_eq!(unsafe { b.as_ref() }.map(|g| g.id()), Some(point.id()));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_as_checked() {
        let point = Point2::new(3, 5);
        let a = NonOwningRef::from_ref(&point);
        let base = unsafe { a.as_checked::<dyn PointBase>() };
        assert_eq!(base.addr(), a.addr());
        let line = unsafe { a.as_checked::<dyn LineBase>() };
        assert!(line.is_null());
        let null = unsafe { NonOwningRef::<Point2>::null().as_checked::<dyn PointBase>() };
        assert!(null.is_null());
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_down_cast() {
        let line = Line::new(Point2::new(0, 0), Point2::new(1, 1));
        let base = NonOwningRef::from_ref(&line).upcast::<dyn Geometry>();
        assert_eq!(unsafe { base.as_checked::<Line>() }.addr(), base.addr());
        assert!(unsafe { base.as_checked::<Point2>() }.is_null());
        let unchecked = base.as_unchecked::<Line>();
        assert_eq!(unsafe { unchecked.as_ref() }.map(|l| l.p2.x), Some(1));
    }
}
