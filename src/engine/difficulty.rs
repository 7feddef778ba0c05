//! Difficulty levels for computer-controlled players.

/// How strong a computer player plays.
///
/// Each level carries the probability that a turn is answered with a
/// uniformly random legal movement instead of a search:
/// `Easy` half the time, `Medium` one turn in five, `Hard` never.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Probability of answering with a random movement instead of a search.
    pub fn random_fraction(self) -> f64 {
        match self {
            Difficulty::Easy => 0.5,
            Difficulty::Medium => 0.2,
            Difficulty::Hard => 0.0,
        }
    }
}
