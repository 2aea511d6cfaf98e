use super::board::{Card, Symbol};

/// Notifications a front end renders. Every method defaults to doing nothing.
pub trait GameObserver {
    /// A new board was dealt; every card is hidden.
    fn on_reset(&mut self, _cards: &[Card]) {}
    fn on_card_revealed(&mut self, _position: usize, _symbol: &Symbol) {}
    fn on_cards_hidden_again(&mut self, _positions: [usize; 2]) {}
    fn on_cards_matched(&mut self, _positions: [usize; 2]) {}
    fn on_attempts_changed(&mut self, _attempts: u32) {}
    fn on_pairs_changed(&mut self, _matched: usize, _total: usize) {}
    fn on_time_changed(&mut self, _elapsed_secs: u32) {}
    fn on_game_complete(&mut self, _elapsed_secs: u32, _attempts: u32) {}
}

impl GameObserver for () {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Reset(Vec<Card>),
    CardRevealed { position: usize, symbol: Symbol },
    CardsHiddenAgain([usize; 2]),
    CardsMatched([usize; 2]),
    AttemptsChanged(u32),
    PairsChanged { matched: usize, total: usize },
    TimeChanged(u32),
    GameComplete { elapsed_secs: u32, attempts: u32 },
}

/// Observer that records every notification in order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Hands over everything recorded so far and starts afresh.
    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn count(&self, predicate: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|event| predicate(event)).count()
    }
}

impl GameObserver for EventLog {
    fn on_reset(&mut self, cards: &[Card]) {
        self.events.push(GameEvent::Reset(cards.to_vec()));
    }

    fn on_card_revealed(&mut self, position: usize, symbol: &Symbol) {
        self.events.push(GameEvent::CardRevealed {
            position,
            symbol: symbol.clone(),
        });
    }

    fn on_cards_hidden_again(&mut self, positions: [usize; 2]) {
        self.events.push(GameEvent::CardsHiddenAgain(positions));
    }

    fn on_cards_matched(&mut self, positions: [usize; 2]) {
        self.events.push(GameEvent::CardsMatched(positions));
    }

    fn on_attempts_changed(&mut self, attempts: u32) {
        self.events.push(GameEvent::AttemptsChanged(attempts));
    }

    fn on_pairs_changed(&mut self, matched: usize, total: usize) {
        self.events.push(GameEvent::PairsChanged { matched, total });
    }

    fn on_time_changed(&mut self, elapsed_secs: u32) {
        self.events.push(GameEvent::TimeChanged(elapsed_secs));
    }

    fn on_game_complete(&mut self, elapsed_secs: u32, attempts: u32) {
        self.events.push(GameEvent::GameComplete {
            elapsed_secs,
            attempts,
        });
    }
}
