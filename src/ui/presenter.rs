use gtk4::prelude::*;

use concentration::game::{Card, GameObserver, Symbol};
use tracing::debug;

use super::board::{clear_flip_classes, play_flip_show, redraw_button_child};
use super::hud::update_subtitle;
use super::scene::{show_game, show_victory};
use super::state::UiState;

impl UiState {
    fn set_face(&self, position: usize, face: Option<String>) {
        if let Some(slot) = self.faces.borrow_mut().get_mut(position) {
            *slot = face;
        }
    }
}

impl GameObserver for UiState {
    fn on_reset(&mut self, cards: &[Card]) {
        {
            let mut faces = self.faces.borrow_mut();
            faces.clear();
            faces.resize(cards.len(), None);
        }
        for button in &self.grid_buttons {
            clear_flip_classes(button);
            button.remove_css_class("active");
            button.remove_css_class("matched");
            redraw_button_child(button);
        }
        show_game(self);
    }

    fn on_card_revealed(&mut self, position: usize, symbol: &Symbol) {
        self.set_face(position, Some(symbol.to_string()));
        if let Some(button) = self.grid_buttons.get(position) {
            button.add_css_class("active");
            play_flip_show(button, &mut self.flip_anim_phase);
        }
    }

    fn on_cards_hidden_again(&mut self, positions: [usize; 2]) {
        for position in positions {
            self.set_face(position, None);
            if let Some(button) = self.grid_buttons.get(position) {
                button.remove_css_class("active");
                play_flip_show(button, &mut self.flip_anim_phase);
            }
        }
    }

    fn on_cards_matched(&mut self, positions: [usize; 2]) {
        for position in positions {
            if let Some(button) = self.grid_buttons.get(position) {
                clear_flip_classes(button);
                button.remove_css_class("active");
                button.add_css_class("matched");
                button.add_css_class("match-bump");
                redraw_button_child(button);
            }
        }
    }

    fn on_attempts_changed(&mut self, attempts: u32) {
        self.attempts = attempts;
        update_subtitle(self);
    }

    fn on_pairs_changed(&mut self, matched: usize, total: usize) {
        self.matched_pairs = matched;
        self.total_pairs = total;
        if matched == total {
            self.board_container.add_css_class("victory-pending");
        }
        update_subtitle(self);
    }

    fn on_time_changed(&mut self, elapsed_secs: u32) {
        self.seconds_elapsed = elapsed_secs;
        update_subtitle(self);
    }

    fn on_game_complete(&mut self, elapsed_secs: u32, attempts: u32) {
        debug!(elapsed_secs, attempts, "showing victory page");
        show_victory(self, elapsed_secs, attempts);
    }
}
