mod autoscroll;
pub use autoscroll::*;
mod bounds;
pub use bounds::*;
mod reorder;
pub use reorder::*;
