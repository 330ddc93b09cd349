//! Test helpers
//!
//! In-memory blob store for exercising the resolver and service without a
//! real backend.

mod memory_store;

pub use memory_store::MemoryStore;
