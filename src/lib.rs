//! Lazy, pull-based iterators that own a closable resource and release it exactly once.
//!
//! A plain [`Iterator`] has no notion of the file, socket or cursor it reads from.
//! Dropping it early, or bailing out with `?` halfway, leaves releasing that resource
//! to whoever happens to hold it. A [`ResourceIterator`] carries the resource with it:
//!
//! - it closes itself the moment it finds out it has no more elements,
//! - every terminal operation ([`to_list()`], [`count()`], [`first()`] ...) closes it
//!   before returning, whether it succeeds or fails,
//! - closing an adaptor closes everything it wraps, exactly once.
//!
//! ```
//! use std::{cell::Cell, io};
//! use resource_iter::prelude::*;
//!
//! // Suppose we open a connection...
//! let released = Cell::new(false);
//! let lines = resource_iter::of(["12", "34", "not an integer", "56"])
//!     .on_close(|| {
//!         released.set(true);
//!         Ok::<_, io::Error>(())
//!     });
//!
//! // Only the first two numbers are needed.
//! let nums = lines
//!     .filter_map(|line| line.parse::<i32>().ok())
//!     .take(2)
//!     .to_list()
//!     .unwrap();
//!
//! assert_eq!(nums, [12, 34]);
//! // The connection is released even though the lines weren't all read.
//! assert!(released.get());
//! ```
//!
//! # Building a pipeline
//!
//! Sources are created by [`of()`], [`from_iter()`], [`from_entries()`], [`generate()`],
//! [`try_generate()`], [`try_from_iter()`] and [`empty()`]. Attach the resource to release
//! with `on_close()`.
//!
//! Adaptors such as [`filter()`](ResourceIterator::filter), [`map()`](ResourceIterator::map),
//! [`flat_map()`](ResourceIterator::flat_map) and [`concat()`](ResourceIterator::concat)
//! take ownership of the iterator they wrap and pull nothing until they are pulled.
//!
//! # Errors
//!
//! Every operation returns a [`Result`] with [`Error`]. Failures of close actions
//! that run together are aggregated: see [`CloseAll`].
//!
//! [`to_list()`]: ResourceIterator::to_list
//! [`count()`]: ResourceIterator::count
//! [`first()`]: ResourceIterator::first

#![cfg_attr(docsrs, feature(doc_cfg))]

mod adaptors;
mod close;
mod error;
mod lookahead;
pub mod prelude;
mod sources;
mod traits;

pub use adaptors::*;
pub use close::*;
pub use error::*;
pub use sources::*;
pub use traits::*;

#[cfg(test)]
mod test_utils;
