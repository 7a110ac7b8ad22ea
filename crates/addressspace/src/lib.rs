//! In-memory address space.
//!
//! This crate provides a `Provider` that keeps the whole node graph in
//! process:
//! - Attribute storage with read/write status semantics
//! - Paged browsing with a provider-side continuation
//! - Browse path translation over typed references
//! - Standard namespace-0 nodes

mod browse;
pub mod config;
mod space;
mod standard;
mod translate;

pub use config::AddressSpaceConfig;
pub use space::AddressSpace;
