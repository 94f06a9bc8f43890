//! Frame calibration helpers.
//!
//! These inspect a frame asset to help place content by hand. They are not part of the
//! production composite path.

pub mod alpha;
pub mod bounds;
pub mod report;
