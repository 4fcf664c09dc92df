use super::card::Card;
use std::collections::HashSet;

/// An ordered sequence of Cards. Deck and Hand are built on top of it.
///
/// Unlike a set, insertion order is kept until someone sorts. Note that
/// [`Cards::canonical_string`] sorts in place, so any prior ordering is
/// gone after reading the canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Cards(Vec<Card>);

impl Cards {
    pub fn empty() -> Self {
        Self(Vec::new())
    }
    pub fn push(&mut self, card: Card) {
        self.0.push(card);
    }
    pub fn extend<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        self.0.extend(cards);
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.0.iter()
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.0.contains(card)
    }
    pub fn as_slice(&self) -> &[Card] {
        &self.0
    }
    /// stable, rank then suit
    pub fn sort(&mut self) {
        self.0.sort();
    }
    pub fn has_no_duplicates(&self) -> bool {
        self.0.iter().collect::<HashSet<&Card>>().len() == self.0.len()
    }
    /// sorts, then concatenates short forms: `"2c3dAs"`
    pub fn canonical_string(&mut self) -> String {
        self.sort();
        self.0.iter().map(Card::to_string).collect()
    }

    /// removes the first n cards, preserving their order
    pub(crate) fn split_front(&mut self, n: usize) -> Vec<Card> {
        self.0.drain(..n).collect()
    }
    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}

impl std::ops::Index<usize> for Cards {
    type Output = Card;
    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i]
    }
}

impl From<Vec<Card>> for Cards {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}
impl From<Cards> for Vec<Card> {
    fn from(cards: Cards) -> Self {
        cards.0
    }
}
impl FromIterator<Card> for Cards {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Cards {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
impl<'a> IntoIterator for &'a Cards {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for Cards {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for card in self.0.iter() {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}
