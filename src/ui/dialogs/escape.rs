//! Confirmation dialog whose cancel button runs away from the pointer.
//!
//! The widgets live here; every decision is made by [`Evader`]. Pointer,
//! resize and timer notifications go in, [`Effect`]s come out and are applied
//! to the button layer.

use crate::config::user::Config;
use crate::core::layout;
use crate::core::random::SeededRandom;
use crate::core::{ButtonId, Effect, Evader, Point, Response, Size, Task};
use crate::ui::hover;
use crate::ui::utils::{extract_widget, natural_size};
use adw::prelude::*;
use gtk4::{gdk, glib};
use gtk4::{Box as GtkBox, Builder, Button, DrawingArea, EventControllerKey, Fixed, Label, Window};
use log::{debug, info};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

type ResponseHandler = Box<dyn Fn(Response) + 'static>;

/// Handle to an escape dialog. Cheap to clone; the dialog stays alive until
/// its window is closed.
#[derive(Clone)]
pub struct EscapeDialog {
    inner: Rc<Inner>,
}

struct Inner {
    window: Window,
    layer: Fixed,
    stay_button: Button,
    evade_button: Button,
    evader: RefCell<Evader>,
    handlers: RefCell<Vec<ResponseHandler>>,
    responded: Cell<bool>,
    animation: RefCell<Option<adw::TimedAnimation>>,
    generation: Cell<u64>,
}

impl EscapeDialog {
    /// Build the dialog. libadwaita must be initialised (an `adw::Application`
    /// does this on startup).
    pub fn new(
        parent: Option<&Window>,
        title: &str,
        message: &str,
        stay_label: &str,
        evade_label: &str,
        config: &Config,
        random: SeededRandom,
    ) -> Self {
        // Load the UI from resource
        let builder = Builder::from_resource(crate::config::resources::dialogs::ESCAPE);

        // Get UI elements
        let window: Window = extract_widget(&builder, "escape_dialog");
        let sensor: DrawingArea = extract_widget(&builder, "size_sensor");
        let overlay: gtk4::Overlay = extract_widget(&builder, "dialog_overlay");
        let message_box: GtkBox = extract_widget(&builder, "message_box");
        let message_label: Label = extract_widget(&builder, "message_label");
        let layer: Fixed = extract_widget(&builder, "button_layer");
        let stay_button: Button = extract_widget(&builder, "stay_button");
        let evade_button: Button = extract_widget(&builder, "evade_button");

        // Set transient parent and texts
        window.set_transient_for(parent);
        window.set_title(Some(title));
        message_label.set_label(message);
        stay_button.set_label(stay_label);
        evade_button.set_label(evade_label);

        let margin = config.behavior.margin;
        message_box.set_margin_top(margin);
        message_box.set_margin_start(margin);
        message_box.set_margin_end(margin);

        // Both buttons take the wider natural width
        let stay_natural = natural_size(&stay_button);
        let evade_natural = natural_size(&evade_button);
        let button = layout::equalized_button_size(stay_natural, evade_natural);
        stay_button.set_size_request(button.width, button.height);
        evade_button.set_size_request(button.width, button.height);

        // Reserve the button strip under the message
        let message_size = natural_size(&message_label);
        let minimum = layout::minimum_size(message_size, button, button, margin);
        message_box.set_margin_bottom(layout::button_strip_height(button, margin));
        sensor.set_content_width(minimum.width);
        sensor.set_content_height(minimum.height);

        let evader = Evader::with_random(
            stay_label,
            evade_label,
            button,
            config.behavior.clone(),
            config.texts.clone(),
            random,
        );

        let inner = Rc::new(Inner {
            window,
            layer,
            stay_button,
            evade_button,
            evader: RefCell::new(evader),
            handlers: RefCell::new(Vec::new()),
            responded: Cell::new(false),
            animation: RefCell::new(None),
            generation: Cell::new(0),
        });

        // Anchor the buttons, then setup callbacks
        inner.resize(minimum);
        Inner::connect_signals(&inner, &sensor, &overlay);

        info!(
            "Escape dialog '{}' created ({}x{} minimum)",
            title, minimum.width, minimum.height
        );

        Self { inner }
    }

    pub fn window(&self) -> &Window {
        &self.inner.window
    }

    /// Register a callback for the dialog result. It runs once, when the
    /// dialog closes.
    pub fn connect_response<F>(&self, handler: F)
    where
        F: Fn(Response) + 'static,
    {
        self.inner.handlers.borrow_mut().push(Box::new(handler));
    }

    pub fn present(&self) {
        self.inner.window.present();
        self.inner.stay_button.grab_focus();
    }
}

impl Inner {
    fn connect_signals(this: &Rc<Self>, sensor: &DrawingArea, overlay: &gtk4::Overlay) {
        let weak = Rc::downgrade(this);
        this.stay_button.connect_clicked(move |_| {
            with_live(&weak, |inner| inner.on_clicked(ButtonId::Stay));
        });

        let weak = Rc::downgrade(this);
        this.evade_button.connect_clicked(move |_| {
            with_live(&weak, |inner| inner.on_clicked(ButtonId::Evade));
        });

        let enter_weak = Rc::downgrade(this);
        let leave_weak = Rc::downgrade(this);
        hover::connect_hover(
            &this.evade_button,
            move |entry| with_live(&enter_weak, |inner| inner.on_pointer_entered(entry)),
            move || with_live(&leave_weak, |inner| inner.on_pointer_left()),
        );

        let weak = Rc::downgrade(this);
        hover::track_pointer(overlay, move |pointer| {
            with_live(&weak, |inner| inner.evader.borrow_mut().track_pointer(pointer));
        });

        let weak = Rc::downgrade(this);
        sensor.connect_resize(move |_, width, height| {
            with_live(&weak, |inner| inner.resize(Size::new(width, height)));
        });

        let key = EventControllerKey::new();
        let weak = Rc::downgrade(this);
        key.connect_key_pressed(move |_, keyval, _, _| {
            if keyval == gdk::Key::Escape {
                with_live(&weak, |inner| inner.respond(Response::Rejected));
                return glib::Propagation::Stop;
            }
            glib::Propagation::Proceed
        });
        this.window.add_controller(key);

        // Holds the dialog alive until the window goes away.
        let inner = Rc::clone(this);
        this.window.connect_close_request(move |_| {
            inner.respond(Response::Rejected);
            glib::Propagation::Proceed
        });
    }

    fn on_clicked(self: &Rc<Self>, button: ButtonId) {
        let response = self.evader.borrow().click(button);
        debug!("{:?} button clicked -> {:?}", button, response);
        self.respond(response);
    }

    fn on_pointer_entered(self: &Rc<Self>, entry: Point) {
        let effects = self.evader.borrow_mut().pointer_entered(entry);
        self.apply(effects);
    }

    fn on_pointer_left(self: &Rc<Self>) {
        let effects = self.evader.borrow_mut().pointer_left();
        self.apply(effects);
    }

    fn resize(&self, size: Size) {
        // A running animation would drag the evade button off its anchor.
        self.generation.set(self.generation.get() + 1);
        self.evader.borrow_mut().resize(size);

        let evader = self.evader.borrow();
        let stay = evader.stay_rect().origin;
        let evade = evader.evade_rect().origin;
        self.layer
            .move_(&self.stay_button, f64::from(stay.x), f64::from(stay.y));
        self.layer
            .move_(&self.evade_button, f64::from(evade.x), f64::from(evade.y));
    }

    fn respond(&self, response: Response) {
        if self.responded.replace(true) {
            return;
        }
        info!("Escape dialog finished: {:?}", response);

        for handler in self.handlers.borrow().iter() {
            handler(response);
        }
        self.window.close();
    }

    fn apply(self: &Rc<Self>, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Animate { from, to, duration } => self.animate(from, to, duration),
                Effect::Relabel { button, text } => self.button(button).set_label(&text),
                Effect::Schedule { delay, task } => self.schedule(delay, task),
            }
        }
    }

    fn button(&self, button: ButtonId) -> &Button {
        match button {
            ButtonId::Stay => &self.stay_button,
            ButtonId::Evade => &self.evade_button,
        }
    }

    fn schedule(self: &Rc<Self>, delay: Duration, task: Task) {
        let weak = Rc::downgrade(self);
        glib::timeout_add_local_once(delay, move || {
            with_live(&weak, |inner| {
                let effects = inner.evader.borrow_mut().run_task(task);
                inner.apply(effects);
            });
        });
    }

    fn animate(self: &Rc<Self>, from: Point, to: Point, duration: Duration) {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        let weak = Rc::downgrade(self);
        let target = adw::CallbackAnimationTarget::new(move |progress| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if inner.generation.get() != generation {
                return;
            }
            let x = f64::from(from.x) + f64::from(to.x - from.x) * progress;
            let y = f64::from(from.y) + f64::from(to.y - from.y) * progress;
            inner.place_evade(Point::new(x.round() as i32, y.round() as i32));
        });

        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        let animation = adw::TimedAnimation::new(&self.layer, 0.0, 1.0, millis, target);
        animation.set_easing(adw::Easing::EaseOutQuint);

        let weak = Rc::downgrade(self);
        animation.connect_done(move |finished| {
            if let Some(inner) = weak.upgrade() {
                release_finished(&inner.animation, finished);
            }
        });

        *self.animation.borrow_mut() = Some(animation.clone());
        animation.play();
    }

    fn place_evade(&self, position: Point) {
        self.evader.borrow_mut().set_evade_position(position);
        self.layer.move_(
            &self.evade_button,
            f64::from(position.x),
            f64::from(position.y),
        );
    }
}

/// Empty `slot` if it still holds `finished`; a newer animation stays.
fn release_finished<T: PartialEq>(slot: &RefCell<Option<T>>, finished: &T) {
    let mut slot = slot.borrow_mut();
    if slot.as_ref() == Some(finished) {
        slot.take();
    }
}

/// Run `action` only while the dialog exists and has not answered yet.
fn with_live<F>(weak: &Weak<Inner>, action: F)
where
    F: FnOnce(&Rc<Inner>),
{
    match weak.upgrade() {
        Some(inner) if !inner.responded.get() => action(&inner),
        _ => debug!("Ignoring event for a closed escape dialog"),
    }
}

/// Show an escape dialog with the user's config and report the answer.
///
/// Resources must be registered first, see
/// [`setup_resources_and_theme`](crate::ui::app::setup_resources_and_theme).
pub fn show_escape_confirmation<F>(
    parent: &Window,
    title: &str,
    message: &str,
    stay_label: &str,
    evade_label: &str,
    on_response: F,
) -> EscapeDialog
where
    F: FnOnce(Response) + 'static,
{
    info!("Showing escape confirmation dialog: {}", title);

    let config = Config::load();
    let dialog = EscapeDialog::new(
        Some(parent),
        title,
        message,
        stay_label,
        evade_label,
        &config,
        SeededRandom::new(),
    );

    let on_response = RefCell::new(Some(on_response));
    dialog.connect_response(move |response| {
        if let Some(on_response) = on_response.borrow_mut().take() {
            on_response(response);
        }
    });

    dialog.present();
    dialog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finished_animation_leaves_slot() {
        let slot = RefCell::new(Some(3_u64));
        release_finished(&slot, &3);
        assert_eq!(*slot.borrow(), None);
    }

    #[test]
    fn superseded_animation_keeps_newer_one() {
        let slot = RefCell::new(Some(4_u64));
        release_finished(&slot, &3);
        assert_eq!(*slot.borrow(), Some(4));

        let empty: RefCell<Option<u64>> = RefCell::new(None);
        release_finished(&empty, &3);
        assert_eq!(*empty.borrow(), None);
    }
}
