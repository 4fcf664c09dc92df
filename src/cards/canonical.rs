use super::card::Card;
use super::deck::Deck;
use super::hand::Hand;
use super::suit::Suit;
use std::collections::BTreeSet;

/// Suit-normalized representative of a starting hand.
///
/// Preflop equity only depends on the two ranks and whether the suits
/// match, so every hand is relabeled onto one of two fixed patterns,
/// higher rank first:
///
/// - suited: `{hi}h{lo}h`
/// - offsuit and pairs: `{hi}h{lo}d`
///
/// That folds the 1,326 two-card hands into 169 classes
/// (13 pairs, 78 suited, 78 offsuit).
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Canonical([Card; 2]);

impl Canonical {
    pub fn hi(&self) -> Card {
        self.0[0]
    }
    pub fn lo(&self) -> Card {
        self.0[1]
    }
    pub fn is_suited(&self) -> bool {
        self.hi().suit() == self.lo().suit()
    }
    pub fn is_pair(&self) -> bool {
        self.hi().rank() == self.lo().rank()
    }

    /// all 169 classes, from every pair of distinct cards in the master deck
    pub fn exhaust() -> Vec<Self> {
        let master = Deck::master();
        master
            .iter()
            .enumerate()
            .flat_map(|(i, a)| master[i + 1..].iter().map(move |b| (*a, *b)))
            .filter_map(|pair| Hand::try_from(pair).ok())
            .map(|hand| Self::from(&hand))
            .collect::<BTreeSet<Self>>()
            .into_iter()
            .collect()
    }
}

impl From<&Hand> for Canonical {
    fn from(hand: &Hand) -> Self {
        let (hi, lo) = match hand.hi().rank() >= hand.lo().rank() {
            true => (hand.hi(), hand.lo()),
            false => (hand.lo(), hand.hi()),
        };
        let suit = match hand.is_same_suit() {
            true => Suit::Heart,
            false => Suit::Diamond,
        };
        Self([
            Card::from((hi.rank(), Suit::Heart)),
            Card::from((lo.rank(), suit)),
        ])
    }
}
impl From<Hand> for Canonical {
    fn from(hand: Hand) -> Self {
        Self::from(&hand)
    }
}

impl std::fmt::Display for Canonical {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.hi(), self.lo())
    }
}
