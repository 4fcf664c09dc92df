use super::game::Game;
use crate::Error;
use crate::cards::Canonical;
use crate::cards::Card;
use crate::cards::Cards;

/// One evaluator request: hands in seat order, an optional board,
/// and the game to score them under.
///
/// Card strings are re-rendered in short form on the way in (so `acas`
/// becomes `AcAs`), but hand order and card order within a hand are
/// kept exactly as given: row `i` of the answer belongs to hand `i`.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Query {
    hands: Vec<String>,
    board: Option<String>,
    game: Game,
}

impl Query {
    pub fn new<I, S>(hands: I, board: Option<&str>, game: Game) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let hands = hands
            .into_iter()
            .map(|hand| Self::hand(hand.as_ref(), game))
            .collect::<Result<Vec<String>, Error>>()?;
        if hands.is_empty() {
            return Err(Error::InvalidCardFormat("no hands to evaluate".into()));
        }
        let board = match board.map(str::trim).filter(|b| !b.is_empty()) {
            None => None,
            Some(b) if game.has_board() => Some(Self::render(b)?),
            Some(b) => {
                return Err(Error::InvalidCardFormat(format!(
                    "game {} takes no board, got {}",
                    game, b
                )));
            }
        };
        let mut all = hands
            .iter()
            .chain(board.iter())
            .map(|s| Card::parse(s))
            .collect::<Result<Vec<Vec<Card>>, Error>>()?
            .into_iter()
            .flatten()
            .collect::<Cards>();
        if !all.has_no_duplicates() {
            return Err(Error::DuplicateCard(all.canonical_string()));
        }
        Ok(Self { hands, board, game })
    }

    fn hand(s: &str, game: Game) -> Result<String, Error> {
        let hand = Self::render(s)?;
        match game.hole_cards() {
            Some(n) if hand.len() != 2 * n => Err(Error::InvalidCardFormat(format!(
                "{} needs {} cards per hand, got {}",
                game, n, s
            ))),
            _ => Ok(hand),
        }
    }

    fn render(s: &str) -> Result<String, Error> {
        match Card::parse(s)? {
            cards if cards.is_empty() => Err(Error::InvalidCardFormat(s.to_string())),
            cards => Ok(cards.iter().map(Card::to_string).collect()),
        }
    }

    pub fn hands(&self) -> &[String] {
        &self.hands
    }
    pub fn board(&self) -> Option<&str> {
        self.board.as_deref()
    }
    pub fn game(&self) -> Game {
        self.game
    }

    /// Composite cache key `{game}|{board or -}|{hand,hand,..}`.
    /// Order sensitive: swapping hands gives a different key.
    pub fn key(&self) -> String {
        format!(
            "{}|{}|{}",
            self.game,
            self.board.as_deref().unwrap_or("-"),
            self.hands.join(",")
        )
    }

    /// command line arguments for the evaluator
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["--game".to_string(), self.game.to_string()];
        if let Some(ref board) = self.board {
            args.push("--board".to_string());
            args.push(board.clone());
        }
        for hand in self.hands.iter() {
            args.push("--hand".to_string());
            args.push(hand.clone());
        }
        args
    }
}

/// a single canonical hand against a random hand, preflop hold'em
impl From<Canonical> for Query {
    fn from(canonical: Canonical) -> Self {
        Self {
            hands: vec![canonical.to_string()],
            board: None,
            game: Game::Holdem,
        }
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Hand;

    #[test]
    fn key_is_order_sensitive() {
        let ab = Query::new(["AcAs", "Kh4d"], None, Game::Holdem).unwrap();
        let ba = Query::new(["Kh4d", "AcAs"], None, Game::Holdem).unwrap();
        assert_ne!(ab.key(), ba.key());
        assert_eq!(ab.key(), "h|-|AcAs,Kh4d");
    }

    #[test]
    fn key_includes_board_and_game() {
        let q = Query::new(["AcAs", "Kh4d"], Some("5c8s9h"), Game::Holdem).unwrap();
        assert_eq!(q.key(), "h|5c8s9h|AcAs,Kh4d");
        let o = Query::new(["AcAsKdKh"], None, Game::OmahaHigh).unwrap();
        assert_eq!(o.key(), "O|-|AcAsKdKh");
    }

    #[test]
    fn normalizes_case_only() {
        let q = Query::new(["acas"], Some(" 5C8s9H "), Game::Holdem).unwrap();
        assert_eq!(q.hands(), ["AcAs"]);
        assert_eq!(q.board(), Some("5c8s9h"));
    }

    #[test]
    fn empty_board_is_no_board() {
        let q = Query::new(["AhKd"], Some(""), Game::Holdem).unwrap();
        assert_eq!(q.board(), None);
    }

    #[test]
    fn stud_hands_any_length() {
        let q = Query::new(["AcAsKd", "7h8h"], None, Game::Stud).unwrap();
        assert_eq!(q.key(), "s|-|AcAsKd,7h8h");
    }

    #[test]
    fn arguments() {
        let q = Query::new(["AcAs", "Kh4d"], Some("5c8s9h"), Game::Holdem).unwrap();
        assert_eq!(
            q.args(),
            ["--game", "h", "--board", "5c8s9h", "--hand", "AcAs", "--hand", "Kh4d"]
        );
    }

    #[test]
    fn rejects_bad_input() {
        let none: [&str; 0] = [];
        assert!(matches!(
            Query::new(none, None, Game::Holdem),
            Err(Error::InvalidCardFormat(_))
        ));
        assert!(matches!(
            Query::new(["AcA"], None, Game::Holdem),
            Err(Error::InvalidCardFormat(_))
        ));
        assert!(matches!(
            Query::new(["Ac"], None, Game::Holdem),
            Err(Error::InvalidCardFormat(_))
        ));
        assert!(matches!(
            Query::new(["AcAsKd"], None, Game::Holdem),
            Err(Error::InvalidCardFormat(_))
        ));
        assert!(matches!(
            Query::new(["AcAs"], None, Game::OmahaHigh),
            Err(Error::InvalidCardFormat(_))
        ));
        assert!(matches!(
            Query::new(["AcAs"], Some("5c8"), Game::Holdem),
            Err(Error::InvalidCardFormat(_))
        ));
        assert!(matches!(
            Query::new(["AcAs"], Some("5c8s9h"), Game::Razz),
            Err(Error::InvalidCardFormat(_))
        ));
        assert!(matches!(
            Query::new(["AcAs", "AcKd"], None, Game::Holdem),
            Err(Error::DuplicateCard(_))
        ));
        assert!(matches!(
            Query::new(["AcAs"], Some("Ac8s9h"), Game::Holdem),
            Err(Error::DuplicateCard(_))
        ));
    }

    #[test]
    fn from_canonical() {
        let hand = Hand::try_from("KcAc").unwrap();
        let q = Query::from(hand.canonical());
        assert_eq!(q.key(), "h|-|AhKh");
        assert_eq!(q.args(), ["--game", "h", "--hand", "AhKh"]);
    }
}
