//!
//! # Ebeam21 Converters
//!
//! Command-line front-ends over the [ebeam21raw] export pipeline.
//!

pub mod poly2gpf;
