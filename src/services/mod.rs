//! Services the editor session depends on.
//!
//! ARCHITECTURE
//! ============
//! The floorplan crate is pure and synchronous. Everything that talks to the
//! outside world (stored documents, the host's device list and states) sits
//! behind the [`store::FloorplanStore`] trait so sessions can be driven by a
//! file store in production and an in-memory or failing store in tests.

pub mod store;
