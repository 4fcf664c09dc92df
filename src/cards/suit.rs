use crate::Error;

/// ordered c < d < h < s, same as their short-form characters
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Suit {
    #[default]
    Club = 0,
    Diamond = 1,
    Heart = 2,
    Spade = 3,
}

impl Suit {
    pub const MAX: Self = Suit::Spade;
    pub const MIN: Self = Suit::Club;

    /// short-form order of the wire format
    pub const fn all() -> [Self; 4] {
        [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club]
    }

    /// one bit per suit in the cdhs nibble of a packed Card
    /// spade=1, heart=2, diamond=4, club=8
    pub const fn mask(&self) -> u32 {
        match self {
            Suit::Spade => 0b0001,
            Suit::Heart => 0b0010,
            Suit::Diamond => 0b0100,
            Suit::Club => 0b1000,
        }
    }

    pub fn char(&self) -> char {
        match self {
            Suit::Club => 'c',
            Suit::Diamond => 'd',
            Suit::Heart => 'h',
            Suit::Spade => 's',
        }
    }
}

impl TryFrom<char> for Suit {
    type Error = Error;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            'c' => Ok(Suit::Club),
            'd' => Ok(Suit::Diamond),
            'h' => Ok(Suit::Heart),
            's' => Ok(Suit::Spade),
            _ => Err(Error::InvalidCardFormat(format!("suit {:?}", c))),
        }
    }
}
impl From<Suit> for u8 {
    fn from(s: Suit) -> u8 {
        s as u8
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_are_disjoint() {
        let all = Suit::all().iter().fold(0, |acc, s| {
            assert!(acc & s.mask() == 0);
            acc | s.mask()
        });
        assert!(all == 0b1111);
    }

    #[test]
    fn bijective_char() {
        for suit in Suit::all() {
            assert!(suit == Suit::try_from(suit.char()).unwrap());
        }
        assert!(Suit::try_from('H').unwrap() == Suit::Heart);
        assert!(Suit::try_from('x').is_err());
    }

    #[test]
    fn ordering() {
        assert!(Suit::Club < Suit::Diamond);
        assert!(Suit::Diamond < Suit::Heart);
        assert!(Suit::Heart < Suit::Spade);
    }
}
