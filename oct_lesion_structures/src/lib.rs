//! The core crate for OCT lesion measurement. Defines the data types shared
//! between the automatic detection pipeline and the manual tracing mode.

mod error;

pub mod data;

pub use error::OctLesionError;
