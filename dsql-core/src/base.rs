//! Core functionalities.
mod batch;
mod mode;
mod recurrent;
mod target;
pub use batch::{BatchBase, TransitionBatch};
pub use mode::{Evaluating, ModeSwitch};
pub use recurrent::PackAndForward;
pub use target::{ActionValueFunction, TargetValues};
