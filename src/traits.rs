mod expand;
mod predicate;
mod resource_iterator;

pub use expand::*;
pub use predicate::*;
pub use resource_iterator::*;
