/// Declares the reference aliases of a type: `FooRef`, `FooSharedRef` and `FooNonOwningRef`.
///
/// `ref_aliases!(pub dyn Foo)` declares the same aliases for the trait object.
///
/// ```
/// use catptr_lib::ref_aliases;
///
/// pub struct Node(u32);
///
/// ref_aliases!(pub Node);
///
/// let shared: NodeSharedRef = NodeSharedRef::new(Node(3));
/// let view: NodeNonOwningRef = shared.non_owning();
/// let owner: NodeRef = NodeRef::new(Node(4));
/// assert_eq!(shared.0 + owner.0, 7);
/// assert!(!view.is_null());
/// ```
#[macro_export]
macro_rules! ref_aliases {
    ($vis:vis dyn $t:ident) => {
        $crate::paste::paste! {
            $vis type [<$t Ref>] = $crate::ptr::ExclusiveRef<dyn $t>;
            $vis type [<$t SharedRef>] = $crate::ptr::SharedRef<dyn $t>;
            $vis type [<$t NonOwningRef>] = $crate::ptr::NonOwningRef<dyn $t>;
        }
    };
    ($vis:vis $t:ident) => {
        $crate::paste::paste! {
            $vis type [<$t Ref>] = $crate::ptr::ExclusiveRef<$t>;
            $vis type [<$t SharedRef>] = $crate::ptr::SharedRef<$t>;
            $vis type [<$t NonOwningRef>] = $crate::ptr::NonOwningRef<$t>;
        }
    };
}
