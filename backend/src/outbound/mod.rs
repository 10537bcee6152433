//! Outbound adapters implementing domain ports for storage.
//!
//! - **memory**: process-local movie collection guarded by an async lock.
//!
//! Adapters are thin translators between domain types and their backing
//! store. They contain no business logic.

pub mod memory;
