//! Session lifecycle and read dispatch.

pub mod binder;

pub use binder::SessionBinder;
