//! Application setup for the standalone dialog.

use crate::config;
use crate::config::user::Config;
use crate::core::random::SeededRandom;
use crate::core::Response;
use crate::ui::dialogs::escape::EscapeDialog;
use adw::prelude::*;
use adw::Application;
use gtk4::{gio, CssProvider};
use log::{info, warn};
use std::cell::Cell;
use std::rc::Rc;

/// What the standalone dialog shows.
#[derive(Debug, Clone)]
pub struct DialogRequest {
    pub title: String,
    pub message: String,
    pub stay_label: String,
    pub evade_label: String,
    pub seed: Option<u64>,
}

/// Show one dialog when the application activates and store its answer in
/// `result`. The application quits once the dialog window closes.
pub fn setup_dialog_ui(
    app: &Application,
    request: DialogRequest,
    config: Config,
    result: Rc<Cell<Option<Response>>>,
) {
    app.connect_activate(move |app| {
        if app.active_window().is_some() {
            return;
        }

        info!("Initializing escape dialog");
        setup_resources_and_theme();

        let random = match request.seed {
            Some(seed) => {
                info!("Using fixed random seed {}", seed);
                SeededRandom::with_seed(seed)
            }
            None => SeededRandom::new(),
        };

        let dialog = EscapeDialog::new(
            None,
            &request.title,
            &request.message,
            &request.stay_label,
            &request.evade_label,
            &config,
            random,
        );
        dialog.window().set_application(Some(app));

        let result = Rc::clone(&result);
        dialog.connect_response(move |response| result.set(Some(response)));
        dialog.present();
    });
}

/// Register the compiled-in resources and install the dialog stylesheet.
pub fn setup_resources_and_theme() {
    info!("Setting up resources and theme");

    gio::resources_register_include!("escape-dialog.gresource")
        .expect("Failed to register gresources");

    if let Some(display) = gtk4::gdk::Display::default() {
        let css_provider = CssProvider::new();
        css_provider.load_from_resource(config::resources::CSS);
        gtk4::style_context_add_provider_for_display(
            &display,
            &css_provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
        info!("UI styling loaded successfully");
    } else {
        warn!("No default display found - UI styling may not work properly");
    }
}
