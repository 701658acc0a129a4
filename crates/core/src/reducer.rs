//! Pure state transitions for front-end state.

/// Explicit state value evolved by actions.
///
/// - **Decision and evolution** happen in one place: `reduce(&self, action)`
///   returns the next state and leaves `self` untouched.
/// - Reducers must not perform IO or side effects; callers run effects (network,
///   clock, randomness) and feed the outcome back in as an action.
///
/// Actions that make no sense in the current state are ignored, i.e. the
/// returned state equals the input.
pub trait Reducer: Clone {
    type Action: Clone + core::fmt::Debug;

    /// Compute the next state for a single action.
    fn reduce(&self, action: &Self::Action) -> Self;

    /// Fold a sequence of actions, in order.
    fn reduce_all<'a, I>(&self, actions: I) -> Self
    where
        I: IntoIterator<Item = &'a Self::Action>,
        Self::Action: 'a,
    {
        actions
            .into_iter()
            .fold(self.clone(), |state, action| state.reduce(action))
    }
}
