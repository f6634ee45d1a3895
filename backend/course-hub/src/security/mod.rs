/// Authorization and credential helpers
///
/// - `ownership`: who may update or delete a record
/// - `rating`: once-per-identity course rating transition
/// - `password`: Argon2id hashing for stored credentials
pub mod ownership;
pub mod password;
pub mod rating;

pub use ownership::{authorize, Decision, Operation};
pub use rating::{apply_rating, AlreadyRated, RatingChange};
