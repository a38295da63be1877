mod id;
mod time;

pub use id::{FixedIdGenerator, IdGenerator, RandomIdGenerator};
pub use time::{Clock, FixedClock, SystemClock};
