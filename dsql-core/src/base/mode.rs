//! Training and inference modes of networks.
use std::ops::{Deref, DerefMut};

/// A model with training and inference behaviors, e.g. dropout.
pub trait ModeSwitch {
    /// Set the model to training mode.
    fn train(&mut self);

    /// Set the model to evaluation mode.
    fn eval(&mut self);

    /// Return if it is in training mode.
    fn is_train(&self) -> bool;
}

/// Keeps a model in evaluation mode while the guard is alive.
///
/// The mode the model had before the guard was created is restored when the
/// guard is dropped, including early returns with `?` and unwinding.
///
/// ```
/// use dsql_core::{Evaluating, ModeSwitch};
///
/// struct Net(bool);
///
/// impl ModeSwitch for Net {
///     fn train(&mut self) { self.0 = true; }
///     fn eval(&mut self) { self.0 = false; }
///     fn is_train(&self) -> bool { self.0 }
/// }
///
/// let mut net = Net(true);
/// {
///     let net = Evaluating::new(&mut net);
///     assert!(!net.is_train());
/// }
/// assert!(net.is_train());
/// ```
pub struct Evaluating<'a, M: ModeSwitch> {
    model: &'a mut M,
    was_train: bool,
}

impl<'a, M: ModeSwitch> Evaluating<'a, M> {
    /// Switches `model` to evaluation mode until the returned guard is dropped.
    pub fn new(model: &'a mut M) -> Self {
        let was_train = model.is_train();
        model.eval();
        Self { model, was_train }
    }
}

impl<'a, M: ModeSwitch> Deref for Evaluating<'a, M> {
    type Target = M;

    fn deref(&self) -> &M {
        self.model
    }
}

impl<'a, M: ModeSwitch> DerefMut for Evaluating<'a, M> {
    fn deref_mut(&mut self) -> &mut M {
        self.model
    }
}

impl<'a, M: ModeSwitch> Drop for Evaluating<'a, M> {
    fn drop(&mut self) {
        if self.was_train {
            self.model.train();
        }
    }
}
