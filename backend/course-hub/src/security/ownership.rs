/// Ownership checks for posts and courses
///
/// Only the identity recorded as `posted_by` may update or delete a record.
/// There are no roles and no override.
use uuid::Uuid;

/// Mutations gated by ownership
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        self == Decision::Allowed
    }
}

/// Decide whether `actor` may perform `op` on a record owned by `owner`
pub fn authorize(actor: Uuid, owner: Uuid, op: Operation) -> Decision {
    let decision = if actor == owner {
        Decision::Allowed
    } else {
        Decision::Denied
    };

    tracing::trace!(%actor, %owner, ?op, ?decision, "ownership check");
    decision
}
