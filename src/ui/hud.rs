use gtk4::prelude::*;

use concentration::game::format_clock;

use super::state::UiState;

pub(super) fn set_header_game(ui: &UiState) {
    update_subtitle(ui);
    ui.header.set_title_widget(Some(&ui.title_game));
    ui.restart_button.set_visible(true);
}

pub(super) fn set_header_victory(ui: &UiState) {
    ui.header.set_title_widget(Some(&ui.title_victory));
    ui.restart_button.set_visible(false);
}

pub(super) fn update_subtitle(ui: &UiState) {
    let attempts = if ui.attempts == 1 {
        "1 attempt".to_string()
    } else {
        format!("{} attempts", ui.attempts)
    };
    ui.title_game_subtitle.set_text(&format!(
        "{} | {}/{} pairs | {}",
        attempts,
        ui.matched_pairs,
        ui.total_pairs,
        format_clock(ui.seconds_elapsed)
    ));
}
