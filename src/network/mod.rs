pub mod dfa;
pub mod spec;

pub use dfa::{ForwardPass, Trainer};
pub use spec::TrainerSpec;
