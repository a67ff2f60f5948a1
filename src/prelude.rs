//! Re-exports commonly used items from this crate.
//!
//! This module is intended to be imported with a wildcard, providing
//! convenient access to the traits needed to build and consume pipelines.
//!
//! # Example
//!
//! ```
//! use resource_iter::prelude::*;
//! ```

pub use crate::{Error, OnClose, ResourceIterator};
