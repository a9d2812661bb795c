pub mod constraint;
pub use constraint::*;

pub mod interval;
pub use interval::*;

pub mod op;
pub use op::*;
