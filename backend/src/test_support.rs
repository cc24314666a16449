//! Test utilities for the backend crate.
//!
//! In-memory adapters reproduce the unique-constraint and owner-scoped
//! predicate semantics of the Postgres repositories so services and the HTTP
//! layer can be exercised end to end without a database. Compiled for unit
//! tests and, behind the `test-support` feature, for `tests/`.

pub mod clock;
pub mod memory;

pub use clock::SteppingClock;
pub use memory::{
    InMemoryImmutableDrawingRepository, InMemoryMutableDrawingRepository,
    InMemorySessionRepository, InMemoryUserRepository, in_memory_repositories,
};
