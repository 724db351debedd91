//! Tween math for scroll snap-back animations.
//!
//! Hosts use this to animate the visible offset back to rest once a pull
//! action completes. Frame times are nanoseconds from any monotonic origin.

mod easing;
mod tween;

pub use easing::*;
pub use tween::*;
