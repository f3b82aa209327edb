#![allow(clippy::missing_safety_doc)]
pub mod harness;
pub mod ptr;
pub mod suites;

#[doc(hidden)]
pub use paste;
