pub mod region_mdp;
pub use region_mdp::*;
