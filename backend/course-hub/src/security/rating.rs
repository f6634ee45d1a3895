/// Course rating transition
///
/// A course keeps the set of identities that rated it (`learner`) and a single
/// `rate` scalar. An identity may rate once; the new value overwrites `rate`
/// (last writer wins, no averaging).
use thiserror::Error;
use uuid::Uuid;

/// Outcome of an accepted rating
#[derive(Debug, Clone, PartialEq)]
pub struct RatingChange {
    pub rate: f64,
    pub learner: Vec<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("identity already rated this course")]
pub struct AlreadyRated;

/// Apply `actor`'s rating to the current learner set
pub fn apply_rating(
    learner: &[Uuid],
    actor: Uuid,
    new_rate: f64,
) -> Result<RatingChange, AlreadyRated> {
    if learner.contains(&actor) {
        return Err(AlreadyRated);
    }

    let mut learner = learner.to_vec();
    learner.push(actor);

    Ok(RatingChange {
        rate: new_rate,
        learner,
    })
}
