pub mod guide;
pub mod intercepts;
pub mod replay;
pub mod waypoints;

pub use guide::handle_guide;
pub use intercepts::handle_intercepts;
pub use replay::{ReplayOptions, handle_replay};
pub use waypoints::handle_waypoints;
