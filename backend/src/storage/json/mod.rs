//! # JSON Document Storage
//!
//! File-based storage keeping one JSON document per record:
//!
//! - `students/<id>.json` — full student record, fee history embedded
//! - `batches/<id>.json` — batch record
//!
//! Writes go through a temp file and an atomic rename, so a crash mid-write
//! never leaves a half-written document behind. Challans are never stored on
//! their own; they only ever change as part of a whole-student write.

pub mod batch_repository;
pub mod connection;
pub mod student_repository;

pub use batch_repository::BatchRepository;
pub use connection::JsonConnection;
pub use student_repository::StudentRepository;
