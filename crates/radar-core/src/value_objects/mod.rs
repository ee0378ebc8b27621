//! Value objects - immutable types that represent domain concepts

mod ids;
mod plan;
mod platform;

pub use ids::{AccountId, ConnectionId, IdParseError, ReviewId};
pub use plan::Plan;
pub use platform::Platform;
