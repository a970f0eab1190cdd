#![warn(missing_docs)]
//! Core traits for computing regression targets of action-value functions.
//!
//! This crate does not depend on any tensor backend. It defines the contracts
//! between a training loop and a target-value strategy:
//!
//! * [`TransitionBatch`] - a batch of transitions with next observations,
//!   rewards, terminal flags and per-transition discounts.
//! * [`ActionValueFunction`] - a network evaluated on the next observations
//!   of a batch.
//! * [`ModeSwitch`] and [`Evaluating`] - switching a network into inference
//!   mode for the duration of a scope.
//! * [`PackAndForward`] - forwarding of recurrent models with carried state.
//! * [`TargetValues`] - a strategy computing the targets, selected when the
//!   learner is constructed.
pub mod error;
mod generic_batch;

mod base;
pub use base::{
    ActionValueFunction, BatchBase, Evaluating, ModeSwitch, PackAndForward, TargetValues,
    TransitionBatch,
};
pub use error::DsqlError;
pub use generic_batch::GenericTransitionBatch;
