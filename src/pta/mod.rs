pub mod error;
pub use error::*;

pub mod pta;
pub use pta::*;

pub mod transition;
pub use transition::*;
