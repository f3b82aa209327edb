use core::{any::Any, ptr::NonNull};

/// Runtime type identification.
///
/// A `Dynamic` value answers a cast [`Request`] by offering a pointer to itself under every
/// type it can be viewed as: its own type and the trait objects it implements. Trait objects
/// of traits that have `Dynamic` as a supertrait are `Dynamic` too, so a checked cast from
/// `dyn A` to `dyn B` consults the dynamic type of the value behind it.
///
/// Use [`dynamic!`](crate::dynamic) instead of implementing it by hand.
///
/// # Safety
///
/// Every pointer offered through [`Request::offer`] must address `self` (identical data
/// address) and must be derived from the pointer passed to the offered function, so that
/// releasing the value through the result releases the complete value.
pub unsafe trait Dynamic {
    fn provide(&self, request: &mut Request<'_>);
}

/// A pending checked cast. Holds the erased source address and the slot for the result.
pub struct Request<'a> {
    source: NonNull<()>,
    slot: &'a mut dyn Any,
}

impl<'a> Request<'a> {
    #[inline(always)]
    fn new<U: ?Sized + 'static>(source: NonNull<()>, slot: &'a mut Option<NonNull<U>>) -> Self {
        Self { source, slot }
    }
    /// Offers the source viewed as `U`. `S` is the concrete type of the source.
    ///
    /// The first offer that matches the requested type wins; the others are ignored.
    pub fn offer<S, U: ?Sized + 'static>(
        &mut self,
        cast: impl FnOnce(NonNull<S>) -> NonNull<U>,
    ) -> &mut Self {
        if let Some(slot) = self.slot.downcast_mut::<Option<NonNull<U>>>() {
            if slot.is_none() {
                let result = cast(self.source.cast());
                debug_assert_eq!(result.cast::<()>(), self.source);
                *slot = Some(result);
            }
        }
        self
    }
}

/// Views the object at `ptr` as a `U` if its dynamic type allows it.
///
/// # Safety
///
/// `ptr` must point to a live object.
pub(crate) unsafe fn cast_checked<T: ?Sized + Dynamic, U: ?Sized + 'static>(
    ptr: NonNull<T>,
) -> Option<NonNull<U>> {
    let mut result: Option<NonNull<U>> = None;
    ptr.as_ref().provide(&mut Request::new(ptr.cast(), &mut result));
    result
}

/// Implements [`Dynamic`](crate::ptr::Dynamic) for a concrete type together with
/// [`Upcast`](crate::ptr::Upcast) edges to the listed trait objects.
///
/// ```
/// use catptr_lib::{dynamic, ptr::{Dynamic, ExclusiveRef}};
///
/// trait Shape: Dynamic {
///     fn area(&self) -> f64;
/// }
///
/// struct Square(f64);
///
/// impl Shape for Square {
///     fn area(&self) -> f64 {
///         self.0 * self.0
///     }
/// }
///
/// dynamic!(Square => dyn Shape);
///
/// let shape: ExclusiveRef<dyn Shape> = ExclusiveRef::new(Square(2.0)).upcast();
/// assert_eq!(shape.area(), 4.0);
/// assert!(!shape.as_checked::<Square>().is_null());
/// ```
#[macro_export]
macro_rules! dynamic {
    ($t:ty $(=> $($base:ty),+ $(,)?)?) => {
        unsafe impl $crate::ptr::Dynamic for $t {
            fn provide(&self, request: &mut $crate::ptr::Request<'_>) {
                request.offer(|p: ::core::ptr::NonNull<$t>| -> ::core::ptr::NonNull<$t> { p });
                $($(
                    request.offer(|p: ::core::ptr::NonNull<$t>| -> ::core::ptr::NonNull<$base> { p });
                )+)?
            }
        }
        $($(
            unsafe impl $crate::ptr::Upcast<$base> for $t {
                #[inline(always)]
                fn upcast(ptr: ::core::ptr::NonNull<$t>) -> ::core::ptr::NonNull<$base> {
                    ptr
                }
            }
        )+)?
    };
}
