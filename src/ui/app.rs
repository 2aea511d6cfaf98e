use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use gtk4 as gtk;
use gtk4::prelude::*;
use libadwaita as adw;
use adw::prelude::*;
use gio::SimpleAction;
use tracing::{info, warn};

use concentration::GameConfig;
use concentration::game::{Deck, GameSession};

use super::board::{CONTENT_MARGIN, build_board_grid};
use super::dialogs::{show_about_dialog, show_instructions_dialog};
use super::scheduler::{GlibScheduler, SharedSession};
use super::state::{Faces, UiState};

pub const APP_ID: &str = "io.github.concentration.Concentration";
const RESOURCE_PREFIX: &str = "/io/github/concentration/Concentration";

pub fn run() -> glib::ExitCode {
    glib::set_prgname(Some(APP_ID));
    let app = adw::Application::builder()
        .application_id(APP_ID)
        .build();

    app.connect_activate(build_window);
    app.run()
}

fn build_window(app: &adw::Application) {
    load_css();

    let config = GameConfig::load_or_default();
    let deck = config.deck().unwrap_or_else(|err| {
        warn!(error = %err, "falling back to the default deck");
        Deck::default()
    });
    let (grid_cols, grid_rows) = config.grid_size(&deck);
    info!(pairs = deck.pair_count(), grid_cols, grid_rows, "starting");

    let instructions_action = SimpleAction::new("instructions", None);
    instructions_action.connect_activate({
        let app = app.clone();
        move |_, _| {
            show_instructions_dialog(&app);
        }
    });
    app.add_action(&instructions_action);

    let about_action = SimpleAction::new("about", None);
    about_action.connect_activate({
        let app = app.clone();
        move |_, _| {
            show_about_dialog(&app);
        }
    });
    app.add_action(&about_action);

    let quit_action = SimpleAction::new("quit", None);
    quit_action.connect_activate({
        let app = app.clone();
        move |_, _| app.quit()
    });
    app.add_action(&quit_action);
    app.set_accels_for_action("app.quit", &["<primary>q"]);

    let dynamic_css_provider = gtk::CssProvider::new();
    if let Some(display) = gtk::gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &dynamic_css_provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }

    let title_game_box = gtk::Box::new(gtk::Orientation::Vertical, 0);
    title_game_box.set_valign(gtk::Align::Center);
    title_game_box.set_halign(gtk::Align::Center);
    title_game_box.set_hexpand(true);

    let title_game_main = gtk::Label::builder()
        .label("Concentration")
        .halign(gtk::Align::Center)
        .css_classes(vec!["game-title-main"])
        .build();

    let title_game_subtitle = gtk::Label::builder()
        .label("")
        .halign(gtk::Align::Center)
        .css_classes(vec!["game-title-subtitle", "caption"])
        .build();

    title_game_box.append(&title_game_main);
    title_game_box.append(&title_game_subtitle);

    let title_victory_box = gtk::Box::new(gtk::Orientation::Vertical, 0);
    title_victory_box.set_valign(gtk::Align::Center);
    title_victory_box.set_halign(gtk::Align::Center);

    let title_victory_main = gtk::Label::new(Some("Concentration"));
    title_victory_main.add_css_class("game-title-main");

    let title_victory_sub = gtk::Label::new(Some("Victory"));
    title_victory_sub.add_css_class("game-title-subtitle");
    title_victory_sub.add_css_class("caption");

    title_victory_box.append(&title_victory_main);
    title_victory_box.append(&title_victory_sub);

    let header = adw::HeaderBar::builder()
        .title_widget(&title_game_box)
        .build();
    header.add_css_class("app-header");
    header.add_css_class("flat");

    let menu_model = gio::Menu::new();
    menu_model.append(Some("New Game"), Some("app.new-game"));
    menu_model.append(Some("Instructions"), Some("app.instructions"));
    menu_model.append(Some("About Concentration"), Some("app.about"));
    menu_model.append(Some("Quit"), Some("app.quit"));
    let menu_button = gtk::MenuButton::builder()
        .icon_name("open-menu-symbolic")
        .menu_model(&menu_model)
        .build();

    let restart_button = gtk::Button::builder()
        .icon_name("view-refresh-symbolic")
        .action_name("app.new-game")
        .build();
    restart_button.set_tooltip_text(Some("New Game"));
    let end_box = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    end_box.append(&restart_button);
    end_box.append(&menu_button);
    header.pack_end(&end_box);

    let faces: Faces = Rc::new(RefCell::new(vec![None; deck.card_count()]));
    let (board_grid, grid_buttons) =
        build_board_grid(deck.card_count(), grid_cols, grid_rows, &faces, &dynamic_css_provider);

    let view_stack = gtk::Stack::new();
    view_stack.set_hexpand(true);
    view_stack.set_vexpand(true);
    view_stack.set_hhomogeneous(false);
    view_stack.set_vhomogeneous(false);
    view_stack.set_interpolate_size(false);
    view_stack.set_transition_type(gtk::StackTransitionType::SlideLeft);
    view_stack.set_transition_duration(300);

    let (game_view, board_container) = build_game_view(&board_grid, grid_cols, grid_rows);
    view_stack.add_named(&game_view, Some("game"));

    let (victory_view, victory_stats_label) = build_victory_view();
    view_stack.add_named(&victory_view, Some("victory"));
    view_stack.set_visible_child_name("game");

    let ui = UiState {
        view_stack: view_stack.clone(),
        header: header.clone(),
        restart_button: restart_button.clone(),
        title_game: title_game_box.upcast::<gtk::Widget>(),
        title_game_subtitle,
        title_victory: title_victory_box.upcast::<gtk::Widget>(),
        victory_stats_label,
        board_container,
        grid_buttons: grid_buttons.clone(),
        faces,
        flip_anim_phase: false,
        attempts: 0,
        matched_pairs: 0,
        total_pairs: deck.pair_count(),
        seconds_elapsed: 0,
    };

    let timing = config.timing();
    let session: SharedSession = Rc::new_cyclic(|weak| {
        RefCell::new(GameSession::new(
            deck,
            timing,
            GlibScheduler::new(weak.clone()),
            ui,
        ))
    });

    for (index, button) in grid_buttons.iter().enumerate() {
        let session = session.clone();
        button.connect_clicked(move |_| {
            session.borrow_mut().select_card(index);
        });
    }

    let new_game_action = SimpleAction::new("new-game", None);
    new_game_action.connect_activate({
        let session = session.clone();
        move |_, _| {
            session.borrow_mut().request_restart();
        }
    });
    app.add_action(&new_game_action);
    app.set_accels_for_action("app.new-game", &["<primary>n"]);

    let toolbar = adw::ToolbarView::new();
    toolbar.set_hexpand(true);
    toolbar.set_vexpand(true);
    toolbar.add_top_bar(&header);
    toolbar.set_content(Some(&view_stack));

    let win = adw::ApplicationWindow::builder()
        .application(app)
        .title("Concentration")
        .icon_name(APP_ID)
        .default_width(640)
        .default_height(720)
        .content(&toolbar)
        .build();
    win.set_size_request(360, 480);
    win.add_css_class("app-window");

    let style_manager = adw::StyleManager::default();
    if style_manager.is_dark() {
        win.add_css_class("theme-dark");
    } else {
        win.add_css_class("theme-light");
    }
    style_manager.connect_notify_local(Some("dark"), {
        let win = win.clone();
        move |manager, _| {
            if manager.is_dark() {
                win.remove_css_class("theme-light");
                win.add_css_class("theme-dark");
            } else {
                win.remove_css_class("theme-dark");
                win.add_css_class("theme-light");
            }
        }
    });

    win.present();
}

fn load_css() {
    static RESOURCES_INIT: Once = Once::new();
    RESOURCES_INIT.call_once(|| {
        gio::resources_register_include!("concentration.gresource")
            .expect("failed to register embedded resources");
    });

    let Some(display) = gtk::gdk::Display::default() else {
        return;
    };

    let provider = gtk::CssProvider::new();
    provider.load_from_resource(&format!("{RESOURCE_PREFIX}/style.css"));
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

fn build_game_view(board_grid: &gtk::Grid, grid_cols: i32, grid_rows: i32) -> (gtk::Box, gtk::Box) {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("game-root");

    let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
    content.set_hexpand(true);
    content.set_vexpand(true);
    content.set_halign(gtk::Align::Fill);
    content.set_valign(gtk::Align::Fill);
    content.set_margin_top(CONTENT_MARGIN);
    content.set_margin_bottom(CONTENT_MARGIN);
    content.set_margin_start(CONTENT_MARGIN);
    content.set_margin_end(CONTENT_MARGIN);

    let board_card = gtk::Box::new(gtk::Orientation::Vertical, 0);
    board_card.set_halign(gtk::Align::Fill);
    board_card.set_valign(gtk::Align::Fill);
    board_card.set_hexpand(true);
    board_card.set_vexpand(true);
    board_card.add_css_class("pairs-card-container");

    board_card.connect_closure(
        "notify::width",
        false,
        glib::closure_local!(move |card: gtk::Box, _: glib::ParamSpec| {
            if card.width() < 500 {
                card.add_css_class("compact");
            } else {
                card.remove_css_class("compact");
            }
        }),
    );

    let grid_ratio = if grid_rows > 0 {
        grid_cols as f32 / grid_rows as f32
    } else {
        1.0
    };
    let grid_frame = gtk::AspectFrame::new(0.5, 0.5, grid_ratio, false);
    grid_frame.set_halign(gtk::Align::Fill);
    grid_frame.set_valign(gtk::Align::Fill);
    grid_frame.set_hexpand(true);
    grid_frame.set_vexpand(true);
    grid_frame.set_child(Some(board_grid));
    board_card.append(&grid_frame);

    content.append(&board_card);
    root.append(&content);

    (root, board_card)
}

fn build_victory_view() -> (gtk::Box, gtk::Label) {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("victory-root");
    root.set_halign(gtk::Align::Fill);
    root.set_valign(gtk::Align::Fill);

    let center = gtk::CenterBox::new();
    center.set_hexpand(true);
    center.set_vexpand(true);

    let card_shell = gtk::Box::new(gtk::Orientation::Vertical, 0);
    card_shell.set_halign(gtk::Align::Center);
    card_shell.set_valign(gtk::Align::Center);
    card_shell.add_css_class("victory-card");
    card_shell.set_size_request(280, 300);

    let content = gtk::Box::new(gtk::Orientation::Vertical, 14);
    content.set_halign(gtk::Align::Center);
    content.set_valign(gtk::Align::Center);
    content.set_margin_top(28);
    content.set_margin_bottom(28);
    content.set_margin_start(28);
    content.set_margin_end(28);

    let title = gtk::Label::new(Some("Well done!"));
    title.add_css_class("victory-title");
    title.add_css_class("title-1");

    let message = gtk::Label::new(Some("Every pair found."));
    message.add_css_class("victory-message");
    message.add_css_class("body");

    let stats = gtk::Label::new(None);
    stats.add_css_class("victory-message");
    stats.add_css_class("body");
    stats.set_wrap(true);
    stats.set_justify(gtk::Justification::Center);
    stats.set_max_width_chars(36);

    let again_btn = gtk::Button::builder()
        .label("Play Again")
        .action_name("app.new-game")
        .halign(gtk::Align::Center)
        .build();
    again_btn.add_css_class("suggested-action");
    again_btn.add_css_class("pill");
    again_btn.set_margin_top(6);

    content.append(&title);
    content.append(&message);
    content.append(&stats);
    content.append(&again_btn);
    card_shell.append(&content);
    center.set_center_widget(Some(&card_shell));
    root.append(&center);

    (root, stats)
}
