use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;

use super::app::APP_ID;

pub fn show_instructions_dialog(app: &adw::Application) -> adw::AlertDialog {
    let dialog = adw::AlertDialog::new(
        Some("Instructions"),
        Some(
            "Reveal two cards per turn.\n\
Matching pairs stay face up, anything else flips back.\n\
Find every pair in as few attempts and as little time as you can.",
        ),
    );
    dialog.add_response("ok", "Got it");
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.present(app.active_window().as_ref());
    dialog
}

pub fn show_about_dialog(app: &adw::Application) -> adw::AboutDialog {
    let dialog = adw::AboutDialog::builder()
        .application_name("Concentration")
        .application_icon(APP_ID)
        .version(env!("CARGO_PKG_VERSION"))
        .comments("A memory game for finding pairs.")
        .build();
    dialog.add_legal_section("Concentration", None, gtk::License::MitX11, None);
    dialog.present(app.active_window().as_ref());
    dialog
}
