use super::card::Card;
use super::cards::Cards;
use super::rank::Rank;
use super::suit::Suit;
use crate::Error;
use rand::Rng;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use std::sync::OnceLock;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

static MASTER: OnceLock<[Card; 52]> = OnceLock::new();
static SERIAL: AtomicU64 = AtomicU64::new(0);

/// Provenance tag for a Deck. Hands drawn from a Deck remember it,
/// but it is only an identifier and never a handle to the Deck itself.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct DeckId(u64);

impl DeckId {
    fn next() -> Self {
        Self(SERIAL.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for DeckId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "deck#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Fresh,
    Drawing,
    Exhausted,
}

/// A shuffled 52-card deck with a drawn/undrawn split.
///
/// `undrawn ∪ drawn` is always a permutation of [`Deck::master`].
/// Draws take cards off the front of the shuffled order. Mutation
/// needs `&mut`, so a Deck has a single owner while dealing.
#[derive(Debug, Clone)]
pub struct Deck {
    id: DeckId,
    cards: Cards,
    drawn: Cards,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// The canonical 52 cards in rank-major order, built on first use
    /// and shared read-only by every Deck afterwards.
    pub fn master() -> &'static [Card; 52] {
        MASTER.get_or_init(|| {
            let mut master = [Card::from((Rank::Two, Suit::Spade)); 52];
            Rank::all()
                .into_iter()
                .flat_map(|r| Suit::all().map(|s| Card::from((r, s))))
                .enumerate()
                .for_each(|(i, card)| master[i] = card);
            master
        })
    }

    /// Creates a deck shuffled with the thread rng.
    pub fn new() -> Self {
        Self::with(&mut rand::rng())
    }
    /// Creates a reproducibly shuffled deck.
    pub fn seeded(seed: u64) -> Self {
        Self::with(&mut rand::rngs::SmallRng::seed_from_u64(seed))
    }
    fn with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self {
            id: DeckId::next(),
            cards: Cards::empty(),
            drawn: Cards::empty(),
        };
        deck.shuffle_with(rng);
        deck
    }

    pub fn id(&self) -> DeckId {
        self.id
    }

    /// Resets to a freshly shuffled full deck. Prior draws are forgotten.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut cards = Self::master().to_vec();
        cards.shuffle(rng);
        self.cards = Cards::from(cards);
        self.drawn.clear();
    }

    /// Takes the first n undrawn cards. Fails without touching the deck
    /// when fewer than n remain.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, Error> {
        if n > self.cards.len() {
            return Err(Error::InsufficientCards {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        let cards = self.cards.split_front(n);
        self.drawn.extend(cards.iter().copied());
        log::info!(
            "{} card(s) drawn from {}, {} card(s) remain",
            n,
            self.id,
            self.cards.len()
        );
        Ok(cards)
    }
    pub fn draw_one(&mut self) -> Result<Card, Error> {
        self.draw(1).map(|mut cards| cards.remove(0))
    }

    pub fn undrawn(&self) -> &Cards {
        &self.cards
    }
    pub fn drawn(&self) -> &Cards {
        &self.drawn
    }
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
    pub fn phase(&self) -> Phase {
        match (self.drawn.len(), self.cards.len()) {
            (0, _) => Phase::Fresh,
            (_, 0) => Phase::Exhausted,
            _ => Phase::Drawing,
        }
    }
}

impl std::fmt::Display for Deck {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn partition(deck: &Deck) {
        let undrawn = deck.undrawn().iter().collect::<HashSet<_>>();
        let drawn = deck.drawn().iter().collect::<HashSet<_>>();
        assert_eq!(deck.undrawn().len() + deck.drawn().len(), 52);
        assert!(undrawn.is_disjoint(&drawn));
        assert!(deck.undrawn().has_no_duplicates());
        assert!(deck.drawn().has_no_duplicates());
    }

    #[test]
    fn master_is_full_and_unique() {
        let master = Deck::master();
        assert!(Cards::from(master.to_vec()).has_no_duplicates());
        assert_eq!(master[0].to_string(), "2s");
        assert_eq!(master[51].to_string(), "Ac");
        assert!(std::ptr::eq(master, Deck::master()));
    }

    #[test]
    fn fresh_deck() {
        let deck = Deck::seeded(7);
        assert_eq!(deck.phase(), Phase::Fresh);
        assert_eq!(deck.remaining(), 52);
        partition(&deck);
    }

    #[test]
    fn seeded_is_reproducible() {
        assert_eq!(Deck::seeded(42).to_string(), Deck::seeded(42).to_string());
        assert_ne!(Deck::seeded(42).id(), Deck::seeded(42).id());
    }

    #[test]
    fn two_draws_of_two() {
        let mut deck = Deck::seeded(1);
        let a = deck.draw(2).unwrap();
        let b = deck.draw(2).unwrap();
        let all = a.iter().chain(b.iter()).collect::<HashSet<_>>();
        assert_eq!(all.len(), 4);
        assert_eq!(deck.remaining(), 48);
        assert_eq!(deck.phase(), Phase::Drawing);
        partition(&deck);
    }

    #[test]
    fn draw_takes_from_the_front() {
        let mut deck = Deck::seeded(3);
        let front = deck.undrawn()[0];
        assert_eq!(deck.draw_one().unwrap(), front);
        assert_eq!(deck.drawn()[0], front);
    }

    #[test]
    fn insufficient_cards_leaves_deck_unchanged() {
        let mut deck = Deck::seeded(9);
        deck.draw(49).unwrap();
        let undrawn = deck.undrawn().clone();
        let drawn = deck.drawn().clone();
        assert!(matches!(
            deck.draw(5),
            Err(Error::InsufficientCards {
                requested: 5,
                remaining: 3
            })
        ));
        assert_eq!(deck.undrawn(), &undrawn);
        assert_eq!(deck.drawn(), &drawn);
    }

    #[test]
    fn exhaust_then_shuffle() {
        let mut deck = Deck::seeded(11);
        deck.draw(52).unwrap();
        assert_eq!(deck.phase(), Phase::Exhausted);
        assert!(deck.draw_one().is_err());
        partition(&deck);
        deck.shuffle();
        assert_eq!(deck.phase(), Phase::Fresh);
        partition(&deck);
    }

    #[test]
    fn partition_holds_across_operations() {
        let ref mut rng = rand::rngs::SmallRng::seed_from_u64(5);
        let mut deck = Deck::seeded(5);
        for _ in 0..64 {
            match rng.random_range(0..4) {
                0 => deck.shuffle_with(rng),
                _ => {
                    let n = rng.random_range(0..=8);
                    let _ = deck.draw(n);
                }
            }
            partition(&deck);
        }
    }
}
