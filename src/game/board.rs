use std::collections::{HashMap, HashSet};
use std::fmt;

use rand::Rng;
use tracing::warn;

use super::shuffle::shuffle;
use crate::config::DEFAULT_SYMBOLS;
use crate::error::{ConfigError, InvariantViolation};

/// Face value shared by the two cards of a pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(value: impl Into<String>) -> Self {
        Symbol(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol::new(value)
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Symbol(value)
    }
}

/// The distinct symbols a board is dealt from. Never empty, never repeats.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    symbols: Vec<Symbol>,
}

impl Deck {
    pub fn new<I, T>(symbols: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Symbol>,
    {
        let symbols: Vec<Symbol> = symbols.into_iter().map(Into::into).collect();
        if symbols.is_empty() {
            return Err(ConfigError::EmptyDeck);
        }
        let mut seen = HashSet::with_capacity(symbols.len());
        for symbol in &symbols {
            if !seen.insert(symbol) {
                return Err(ConfigError::DuplicateSymbol(symbol.to_string()));
            }
        }
        Ok(Deck { symbols })
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn pair_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn card_count(&self) -> usize {
        self.symbols.len() * 2
    }

    /// `deck ++ deck`, in deck order.
    pub fn doubled(&self) -> Vec<Symbol> {
        self.symbols.iter().chain(self.symbols.iter()).cloned().collect()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Deck {
            symbols: DEFAULT_SYMBOLS.iter().copied().map(Symbol::from).collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardState {
    Hidden,
    Revealed,
    Matched,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    symbol: Symbol,
    position: usize,
    state: CardState,
}

impl Card {
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn is_hidden(&self) -> bool {
        self.state == CardState::Hidden
    }
}

/// Cards in board order plus the input lock.
///
/// Card state only changes through [`Board::reveal`], [`Board::resolve_match`]
/// and [`Board::resolve_mismatch`].
#[derive(Clone, Debug, Default)]
pub struct Board {
    cards: Vec<Card>,
    locked: bool,
}

impl Board {
    pub fn with_layout(symbols: Vec<Symbol>) -> Self {
        let cards = symbols
            .into_iter()
            .enumerate()
            .map(|(position, symbol)| Card {
                symbol,
                position,
                state: CardState::Hidden,
            })
            .collect();
        Board {
            cards,
            locked: false,
        }
    }

    pub fn shuffled<R: Rng + ?Sized>(deck: &Deck, rng: &mut R) -> Self {
        let mut symbols = deck.doubled();
        shuffle(&mut symbols, rng);
        Self::with_layout(symbols)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub(crate) fn lock(&mut self) {
        self.locked = true;
    }

    pub(crate) fn unlock(&mut self) {
        self.locked = false;
    }

    /// Turns a hidden card face up and hands back its symbol.
    ///
    /// Returns `None` without touching anything when the board is locked, the
    /// position is off the board, or the card is already face up.
    pub fn reveal(&mut self, position: usize) -> Option<Symbol> {
        if self.locked {
            return None;
        }
        let card = self.cards.get_mut(position)?;
        if card.state != CardState::Hidden {
            return None;
        }
        card.state = CardState::Revealed;
        Some(card.symbol.clone())
    }

    pub fn resolve_match(&mut self, a: usize, b: usize) {
        self.settle([a, b], CardState::Matched);
    }

    pub fn resolve_mismatch(&mut self, a: usize, b: usize) {
        self.settle([a, b], CardState::Hidden);
    }

    fn settle(&mut self, positions: [usize; 2], to: CardState) {
        for position in positions {
            match self.cards.get_mut(position) {
                Some(card) if card.state == CardState::Revealed => card.state = to,
                Some(card) => {
                    warn!(position, state = ?card.state, "settling a card that is not revealed")
                }
                None => warn!(position, "settling a card off the board"),
            }
        }
    }

    pub fn count(&self, state: CardState) -> usize {
        self.cards.iter().filter(|card| card.state == state).count()
    }

    pub fn all_matched(&self) -> bool {
        self.cards.iter().all(|card| card.state == CardState::Matched)
    }

    /// Checks the layout against `deck`: two cards per symbol, nothing else,
    /// each card at its recorded position.
    pub fn verify(&self, deck: &Deck) -> Result<(), InvariantViolation> {
        if self.cards.len() != deck.card_count() {
            return Err(InvariantViolation::CardCount {
                expected: deck.card_count(),
                actual: self.cards.len(),
            });
        }

        let mut counts: HashMap<&Symbol, usize> =
            deck.symbols().iter().map(|symbol| (symbol, 0)).collect();
        for (index, card) in self.cards.iter().enumerate() {
            if card.position != index {
                return Err(InvariantViolation::MisplacedCard {
                    index,
                    recorded: card.position,
                });
            }
            *counts.entry(&card.symbol).or_default() += 1;
        }

        let mut uneven: Vec<_> = counts.into_iter().filter(|(_, count)| *count != 2).collect();
        uneven.sort();
        match uneven.first() {
            Some((symbol, count)) => Err(InvariantViolation::UnpairedSymbol {
                symbol: (*symbol).clone(),
                count: *count,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn small_deck() -> Deck {
        Deck::new(["a", "b"]).unwrap()
    }

    fn layout(symbols: &[&str]) -> Board {
        Board::with_layout(symbols.iter().copied().map(Symbol::from).collect())
    }

    #[test]
    fn deck_rejects_empty_and_duplicates() {
        assert!(matches!(Deck::new(Vec::<String>::new()), Err(ConfigError::EmptyDeck)));
        assert!(matches!(
            Deck::new(["x", "y", "x"]),
            Err(ConfigError::DuplicateSymbol(s)) if s == "x"
        ));
    }

    #[test]
    fn shuffled_board_pairs_every_symbol() {
        let deck = Deck::default();
        let board = Board::shuffled(&deck, &mut StdRng::seed_from_u64(5));
        assert_eq!(board.len(), 16);
        assert!(board.cards().iter().all(Card::is_hidden));
        assert!(!board.is_locked());
        assert_eq!(board.verify(&deck), Ok(()));
    }

    #[test]
    fn reveal_only_flips_hidden_cards() {
        let mut board = layout(&["a", "b", "a", "b"]);
        assert_eq!(board.reveal(1), Some(Symbol::from("b")));
        assert_eq!(board.card(1).unwrap().state(), CardState::Revealed);
        assert_eq!(board.reveal(1), None);
        assert_eq!(board.reveal(9), None);
    }

    #[test]
    fn locked_board_ignores_reveal() {
        let mut board = layout(&["a", "b", "a", "b"]);
        board.lock();
        assert_eq!(board.reveal(0), None);
        assert_eq!(board.count(CardState::Hidden), 4);
        board.unlock();
        assert!(board.reveal(0).is_some());
    }

    #[test]
    fn match_is_terminal() {
        let mut board = layout(&["a", "b", "a", "b"]);
        board.reveal(0);
        board.reveal(2);
        board.resolve_match(0, 2);
        assert_eq!(board.count(CardState::Matched), 2);
        assert_eq!(board.reveal(0), None);

        // Rolling back a matched card must not resurrect it.
        board.resolve_mismatch(0, 2);
        assert_eq!(board.count(CardState::Matched), 2);
    }

    #[test]
    fn mismatch_hides_both_cards() {
        let mut board = layout(&["a", "b", "a", "b"]);
        board.reveal(0);
        board.reveal(1);
        board.resolve_mismatch(0, 1);
        assert_eq!(board.count(CardState::Hidden), 4);
    }

    #[test]
    fn all_matched_after_every_pair() {
        let mut board = layout(&["a", "b", "a", "b"]);
        for (x, y) in [(0, 2), (1, 3)] {
            board.reveal(x);
            board.reveal(y);
            board.resolve_match(x, y);
        }
        assert!(board.all_matched());
    }

    #[test]
    fn verify_flags_odd_symbols() {
        let board = layout(&["a", "a", "a", "b"]);
        assert_eq!(
            board.verify(&small_deck()),
            Err(InvariantViolation::UnpairedSymbol {
                symbol: Symbol::from("a"),
                count: 3
            })
        );
    }

    #[test]
    fn verify_flags_wrong_size() {
        let board = layout(&["a", "a"]);
        assert_eq!(
            board.verify(&small_deck()),
            Err(InvariantViolation::CardCount {
                expected: 4,
                actual: 2
            })
        );
    }
}
