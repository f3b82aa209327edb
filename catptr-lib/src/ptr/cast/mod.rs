mod dynamic;
mod upcast;

pub(crate) use self::dynamic::cast_checked;
pub use self::{
    dynamic::{Dynamic, Request},
    upcast::Upcast,
};
