#![forbid(unsafe_code)]

//! Persistence for the flag quiz: the flag repository contract, an in-memory
//! store for tests, the `SQLite` backend, and the one-time database
//! provisioner that copies the bundled asset into writable storage.

pub mod provision;
pub mod repository;
pub mod sqlite;
