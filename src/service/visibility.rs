use sea_orm::Condition;

use crate::filtering::Predicate;

/// Which records the current actor may see, applied on top of the compiled criteria.
///
/// Resolving the actor (session user, linked profile, ...) is the caller's job; this type only
/// carries the outcome.
#[derive(Debug, Clone, Default)]
pub enum Visibility {
    /// No restriction.
    #[default]
    All,
    /// Only records matching the condition, ANDed with the criteria.
    Restricted(Condition),
    /// The actor could not be resolved: every query yields nothing.
    Unresolved,
}

impl Visibility {
    /// Scope to `actor` through `scope`, or [`Visibility::Unresolved`] when there is no actor.
    ///
    /// ```rust,ignore
    /// let visibility = Visibility::for_actor(player_id, |id| {
    ///     Condition::any()
    ///         .add(challenge::Column::ProposerId.eq(id))
    ///         .add(challenge::Column::AcceptorId.eq(id))
    /// });
    /// ```
    pub fn for_actor<A>(actor: Option<A>, scope: impl FnOnce(A) -> Condition) -> Self {
        actor.map_or(Self::Unresolved, |actor| Self::Restricted(scope(actor)))
    }

    #[must_use]
    pub const fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved)
    }

    /// Narrow `predicate`, or `None` when nothing is visible.
    pub(crate) fn apply(&self, predicate: Predicate) -> Option<Predicate> {
        match self {
            Self::All => Some(predicate),
            Self::Restricted(condition) => Some(predicate.and(condition.clone())),
            Self::Unresolved => None,
        }
    }
}
