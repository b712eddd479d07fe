//! FFI bridge crate for the JetNotes mobile UI.
//! All exported functions live in `api`; bindings are generated from it.

pub mod api;
