//! Foundation types for fixport.
//!
//! This crate provides the entity data model shared by the codec, the store,
//! and the fixture operations. Every other fixport crate depends on
//! `fixport-types`.
//!
//! # Key Types
//!
//! - [`EntityKey`] — Structured entity identifier with optional ancestor chain
//! - [`KeyId`] — Numeric id or string name component of a key
//! - [`FieldValue`] — Tagged union of every value a stored field can hold
//! - [`Entity`] — A kind, an optional key, and a field map

pub mod entity;
pub mod key;
pub mod value;

pub use entity::Entity;
pub use key::{EntityKey, KeyId};
pub use value::FieldValue;
