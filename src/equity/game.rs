/// Game variants understood by the evaluator, each named by its
/// one-character code on the command line.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Game {
    #[default]
    Holdem,
    OmahaHiLo,
    OmahaHigh,
    Razz,
    Stud,
    StudHiLo,
    StudHiLoNoQualifier,
    DrawHigh,
    LowballA5,
    KansasCity27,
    TripleDraw27,
    TripleDrawA5,
    Badugi,
    ThreeCard,
}

impl Game {
    pub const fn all() -> [Self; 14] {
        [
            Game::Holdem,
            Game::OmahaHiLo,
            Game::OmahaHigh,
            Game::Razz,
            Game::Stud,
            Game::StudHiLo,
            Game::StudHiLoNoQualifier,
            Game::DrawHigh,
            Game::LowballA5,
            Game::KansasCity27,
            Game::TripleDraw27,
            Game::TripleDrawA5,
            Game::Badugi,
            Game::ThreeCard,
        ]
    }
    pub const fn code(&self) -> char {
        match self {
            Game::Holdem => 'h',
            Game::OmahaHiLo => 'o',
            Game::OmahaHigh => 'O',
            Game::Razz => 'r',
            Game::Stud => 's',
            Game::StudHiLo => 'e',
            Game::StudHiLoNoQualifier => 'q',
            Game::DrawHigh => 'd',
            Game::LowballA5 => 'l',
            Game::KansasCity27 => 'k',
            Game::TripleDraw27 => 't',
            Game::TripleDrawA5 => 'T',
            Game::Badugi => 'b',
            Game::ThreeCard => '3',
        }
    }
    /// Cards per hand where the game fixes it. Stud hands grow street
    /// by street, so any count goes.
    pub const fn hole_cards(&self) -> Option<usize> {
        match self {
            Game::Holdem => Some(2),
            Game::OmahaHiLo | Game::OmahaHigh => Some(4),
            _ => None,
        }
    }
    /// only the flop games take a board
    pub const fn has_board(&self) -> bool {
        matches!(self, Game::Holdem | Game::OmahaHiLo | Game::OmahaHigh)
    }
}

/// codes are case-sensitive: `o` and `O` are different games
impl TryFrom<char> for Game {
    type Error = String;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::all()
            .into_iter()
            .find(|g| g.code() == c)
            .ok_or_else(|| format!("unknown game code {:?}", c))
    }
}
impl std::str::FromStr for Game {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c),
            _ => Err(format!("game code must be one character, got {:?}", s)),
        }
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
