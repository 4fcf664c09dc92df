use super::canonical::Canonical;
use super::card::Card;
use super::cards::Cards;
use super::deck::Deck;
use super::deck::DeckId;
use crate::Error;
use crate::equity::Cache;
use crate::equity::Oracle;
use crate::equity::Query;
use crate::equity::Stats;
use crate::equity::Store;

/// The two ways to name a starting hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandInput {
    /// four characters of short form, e.g. `"AcKd"`
    FromString(String),
    FromCardPair(Card, Card),
}

/// A player's two private cards, always sorted ascending.
///
/// Hands drawn from a [`Deck`] remember which one, as a [`DeckId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hand {
    cards: Cards,
    deck: Option<DeckId>,
}

impl Hand {
    /// Draws two cards off the top of the deck.
    pub fn draw_from_deck(deck: &mut Deck) -> Result<Self, Error> {
        let cards = deck.draw(2)?;
        let mut hand = Self::try_from(HandInput::FromCardPair(cards[0], cards[1]))?;
        hand.deck = Some(deck.id());
        Ok(hand)
    }

    pub fn cards(&self) -> &Cards {
        &self.cards
    }
    pub fn deck(&self) -> Option<DeckId> {
        self.deck
    }
    pub fn lo(&self) -> Card {
        self.cards[0]
    }
    pub fn hi(&self) -> Card {
        self.cards[1]
    }
    pub fn is_same_suit(&self) -> bool {
        self.lo().suit() == self.hi().suit()
    }
    pub fn is_pair(&self) -> bool {
        self.lo().rank() == self.hi().rank()
    }
    pub fn canonical(&self) -> Canonical {
        Canonical::from(self)
    }

    /// Probability in [0, 1] that this hand beats a random hand preflop
    /// in hold'em, split pots counted as half. Only the suit class of
    /// the hand matters, so the query goes out under its canonical key.
    pub fn equity<O, S>(&self, cache: &Cache<O, S>) -> Result<f64, Error>
    where
        O: Oracle,
        S: Store,
    {
        let canonical = self.canonical();
        log::debug!("simplified hand {} -> {}", self, canonical);
        cache
            .evaluate(&Query::from(canonical))?
            .first()
            .map(Stats::fraction)
            .ok_or_else(|| Error::MalformedEvaluatorOutput("no rows".into()))
    }
}

impl TryFrom<HandInput> for Hand {
    type Error = Error;
    fn try_from(input: HandInput) -> Result<Self, Self::Error> {
        let mut cards = match input {
            HandInput::FromCardPair(a, b) => Cards::from(vec![a, b]),
            HandInput::FromString(s) => match Card::parse(&s)? {
                pair if pair.len() == 2 => Cards::from(pair),
                _ => return Err(Error::InvalidCardFormat(s)),
            },
        };
        if !cards.has_no_duplicates() {
            return Err(Error::DuplicateCard(cards.to_string()));
        }
        cards.sort();
        Ok(Self { cards, deck: None })
    }
}
impl TryFrom<&str> for Hand {
    type Error = Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::try_from(HandInput::FromString(s.to_string()))
    }
}
impl TryFrom<(Card, Card)> for Hand {
    type Error = Error;
    fn try_from((a, b): (Card, Card)) -> Result<Self, Self::Error> {
        Self::try_from(HandInput::FromCardPair(a, b))
    }
}

impl From<Hand> for Cards {
    fn from(hand: Hand) -> Self {
        hand.cards
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_on_construction() {
        let hand = Hand::try_from("KdAc").unwrap();
        assert_eq!(hand.to_string(), "KdAc");
        let hand = Hand::try_from("Ac2d").unwrap();
        assert_eq!(hand.to_string(), "2dAc");
        assert_eq!(hand.hi(), Card::try_from("Ac").unwrap());
    }

    #[test]
    fn both_inputs_agree() {
        let a = Hand::try_from(HandInput::FromString("QsJs".into())).unwrap();
        let b = Hand::try_from(HandInput::FromCardPair(
            Card::try_from("Js").unwrap(),
            Card::try_from("Qs").unwrap(),
        ))
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_duplicates() {
        assert!(matches!(Hand::try_from("AcAc"), Err(Error::DuplicateCard(_))));
    }

    #[test]
    fn rejects_bad_format() {
        assert!(matches!(Hand::try_from("AcK"), Err(Error::InvalidCardFormat(_))));
        assert!(matches!(Hand::try_from("AcKd2h"), Err(Error::InvalidCardFormat(_))));
        assert!(matches!(Hand::try_from("AcKx"), Err(Error::InvalidCardFormat(_))));
    }

    #[test]
    fn predicates() {
        let suited = Hand::try_from("AcKc").unwrap();
        let offsuit = Hand::try_from("AcKd").unwrap();
        let pair = Hand::try_from("AcAs").unwrap();
        assert!(suited.is_same_suit() && !suited.is_pair());
        assert!(!offsuit.is_same_suit() && !offsuit.is_pair());
        assert!(!pair.is_same_suit() && pair.is_pair());
    }

    #[test]
    fn drawn_from_deck() {
        let mut deck = Deck::seeded(13);
        let top = deck.undrawn().iter().take(2).copied().collect::<Vec<Card>>();
        let hand = Hand::draw_from_deck(&mut deck).unwrap();
        assert_eq!(hand.deck(), Some(deck.id()));
        assert!(hand.cards().contains(&top[0]));
        assert!(hand.cards().contains(&top[1]));
        assert!(hand.lo() < hand.hi());
        assert_eq!(deck.remaining(), 50);
    }

    #[test]
    fn drawn_from_short_deck() {
        let mut deck = Deck::seeded(17);
        deck.draw(51).unwrap();
        assert!(matches!(
            Hand::draw_from_deck(&mut deck),
            Err(Error::InsufficientCards { .. })
        ));
        assert_eq!(deck.remaining(), 1);
    }
}
