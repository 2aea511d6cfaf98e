use gtk4 as gtk;
use gtk4::prelude::*;

use concentration::game::format_clock;

use super::hud::{set_header_game, set_header_victory};
use super::state::UiState;

pub(super) fn show_game(ui: &UiState) {
    ui.board_container.remove_css_class("victory-pending");
    set_header_game(ui);
    if ui.view_stack.visible_child_name().as_deref() != Some("game") {
        ui.view_stack.set_transition_type(gtk::StackTransitionType::SlideRight);
        ui.view_stack.set_visible_child_name("game");
    }
}

pub(super) fn show_victory(ui: &UiState, elapsed_secs: u32, attempts: u32) {
    ui.victory_stats_label.set_text(&format!(
        "Time: {}\nAttempts: {}",
        format_clock(elapsed_secs),
        attempts
    ));
    set_header_victory(ui);
    ui.view_stack.set_transition_type(gtk::StackTransitionType::SlideLeft);
    ui.view_stack.set_visible_child_name("victory");
}
