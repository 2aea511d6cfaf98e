use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use libadwaita as adw;

/// What each card button draws: the symbol while face up, `None` face down.
pub type Faces = Rc<RefCell<Vec<Option<String>>>>;

/// Widgets the game notifications write to, plus the figures shown in the
/// header subtitle.
pub struct UiState {
    pub view_stack: gtk::Stack,
    pub header: adw::HeaderBar,
    pub restart_button: gtk::Button,
    pub title_game: gtk::Widget,
    pub title_game_subtitle: gtk::Label,
    pub title_victory: gtk::Widget,
    pub victory_stats_label: gtk::Label,
    pub board_container: gtk::Box,
    pub grid_buttons: Vec<gtk::Button>,
    pub faces: Faces,
    pub flip_anim_phase: bool,
    pub attempts: u32,
    pub matched_pairs: usize,
    pub total_pairs: usize,
    pub seconds_elapsed: u32,
}
