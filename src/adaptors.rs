mod chunked;
mod concat;
mod distinct;
mod filter;
mod filter_map;
mod flat_map;
mod inspect;
mod items;
mod map;
mod skip;
mod take;
mod take_while;

pub use chunked::*;
pub use concat::*;
pub use distinct::*;
pub use filter::*;
pub use filter_map::*;
pub use flat_map::*;
pub use inspect::*;
pub use items::*;
pub use map::*;
pub use skip::*;
pub use take::*;
pub use take_while::*;
