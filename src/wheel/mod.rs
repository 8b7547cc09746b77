//! Wheel construction: naming, metadata documents, the `RECORD` manifest,
//! and per-platform assembly of the final archives.

pub mod assemble;
pub mod metadata;
pub mod naming;
pub mod record;
