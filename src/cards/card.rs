use super::rank::Rank;
use super::suit::Suit;
use crate::Error;

/// A playing card. Immutable once built.
///
/// Ordering is by rank first, then by suit, which is also the field order
/// of the derive. Two cards are equal iff rank and suit both match.
///
/// # Representations
///
/// - `(Rank, Suit)`: the value itself
/// - `&str`: two-character short form like `"As"` or `"Tc"`
/// - `u32`: packed bit layout for rank arithmetic, see [`Card::encode`]
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Packs the card into 32 bits.
    ///
    /// ```text
    /// bitrank     suit rank   prime
    /// xxxbbbbb bbbbbbbb cdhsrrrr xxpppppp
    /// ```
    ///
    /// - `b`: one bit at `16 + rank index`
    /// - `cdhs`: suit mask, spade=1 heart=2 diamond=4 club=8
    /// - `r`: rank index, deuce=0 .. ace=12
    /// - `p`: prime of the rank, deuce=2 .. ace=41
    pub fn encode(&self) -> u32 {
        let bitrank = (u16::from(self.rank) as u32) << 16;
        let suit = self.suit.mask() << 12;
        let rank = (u8::from(self.rank) as u32) << 8;
        let prime = self.rank.prime() as u32;
        bitrank | suit | rank | prime
    }

    /// nibble-grouped binary of the packed form, most significant first
    pub fn binary(&self) -> String {
        format!("{:032b}", self.encode())
            .as_bytes()
            .chunks(4)
            .map(|nibble| String::from_utf8_lossy(nibble).into_owned())
            .collect::<Vec<String>>()
            .join(" ")
    }

    /// Parses concatenated short forms like `"5c8s9h"`.
    /// Whitespace is ignored.
    pub fn parse(s: &str) -> Result<Vec<Self>, Error> {
        let chars = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<Vec<char>>();
        if chars.len() % 2 != 0 {
            return Err(Error::InvalidCardFormat(s.to_string()));
        }
        chars
            .chunks(2)
            .map(|pair| Self::try_from((pair[0], pair[1])))
            .collect()
    }
}

/// (Rank, Suit) isomorphism
impl From<(Rank, Suit)> for Card {
    fn from((rank, suit): (Rank, Suit)) -> Self {
        Self { rank, suit }
    }
}
impl From<Card> for (Rank, Suit) {
    fn from(c: Card) -> Self {
        (c.rank, c.suit)
    }
}

/// one-way u32 packing
impl From<Card> for u32 {
    fn from(c: Card) -> u32 {
        c.encode()
    }
}

impl TryFrom<(char, char)> for Card {
    type Error = Error;
    fn try_from((rank, suit): (char, char)) -> Result<Self, Self::Error> {
        Ok(Self {
            rank: Rank::try_from(rank)?,
            suit: Suit::try_from(suit)?,
        })
    }
}

/// str isomorphism
impl TryFrom<&str> for Card {
    type Error = Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(rank), Some(suit), None) => Self::try_from((rank, suit)),
            _ => Err(Error::InvalidCardFormat(s.to_string())),
        }
    }
}
impl std::str::FromStr for Card {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Product of the rank primes of every card. Cards with the same rank
/// multiset share a product regardless of suit.
pub fn prime_product(cards: &[Card]) -> u64 {
    cards
        .iter()
        .map(|c| (c.encode() & 0xFF) as u64)
        .product()
}

/// Product of the primes of the ranks set in a 13-bit rank mask.
/// Only meaningful when all ranks are distinct (flushes, straights).
pub fn prime_product_from_rankbits(rankbits: u16) -> u64 {
    Rank::all()
        .into_iter()
        .filter(|r| rankbits & u16::from(*r) != 0)
        .map(|r| r.prime() as u64)
        .product()
}
