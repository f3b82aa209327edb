use core::ptr::NonNull;

/// A static "is-a" edge: every `Self` can be viewed as a `U`.
///
/// Converting along an `Upcast` edge never fails and never inspects the value.
///
/// # Safety
///
/// `upcast` must return a pointer to the same object, so that releasing the object through
/// the result releases the complete value.
pub unsafe trait Upcast<U: ?Sized> {
    fn upcast(ptr: NonNull<Self>) -> NonNull<U>;
}

unsafe impl<T: ?Sized> Upcast<T> for T {
    #[inline(always)]
    fn upcast(ptr: NonNull<Self>) -> NonNull<T> {
        ptr
    }
}
