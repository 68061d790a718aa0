//! core
//!
//! Core domain types, schemas, and storage for short-name aliases.
//!
//! # Modules
//!
//! - [`reference`] - Container image reference grammar and normalization
//! - [`naming`] - Short-name and alias-value validation rules
//! - [`types`] - Strong types: ShortName, AliasValue, Alias
//! - [`store`] - User alias store schema, loading, and persistence
//! - [`lock`] - Advisory file lock guarding the store
//! - [`config`] - Runtime context and registries.conf schema
//! - [`paths`] - Path routing for the user alias store
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid names from reaching the store
//! - Every malformed entry is reported, not just the first
//! - Writes replace the whole file atomically

pub mod config;
pub mod lock;
pub mod naming;
pub mod paths;
pub mod reference;
pub mod store;
pub mod types;
