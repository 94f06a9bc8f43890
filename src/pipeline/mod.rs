//! End-to-end poster flows: load frame, fit content, composite, export.

pub mod config;
pub mod poster;
