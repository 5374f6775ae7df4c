//! Type-tagged marshaling of trait objects.
//!
//! Values reached through an abstract destination (a `Box<dyn Trait>`) are
//! written with a type-name decoration, and decoded back into the exact
//! concrete type through a per-unmarshaler binding registry.

/// Text substrate, naming policies, binding registry, and the marshal/unmarshal engine.
pub mod zson;
