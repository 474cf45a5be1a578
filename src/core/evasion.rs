//! Evasion state machine for the escape dialog.
//!
//! [`Evader`] knows nothing about widgets. The dialog shell forwards pointer,
//! resize and timer notifications to it and executes the returned [`Effect`]s:
//! animating the evade button, relabelling a button, or scheduling a
//! [`Task`] to be fed back through [`Evader::run_task`] later.

use super::geometry::{Point, Rect, Size};
use super::layout;
use super::random::{RandomSource, SeededRandom};
use crate::config::user::{BehaviorConfig, TextsConfig};
use log::{debug, warn};
use std::time::Duration;

/// Redraws allowed before giving up on a pointer-free destination.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

const BASE_ANIMATION_MS: u64 = 100;

/// Pixel-tolerance equality used for entry-side detection.
pub fn is_equal(a: i32, b: i32) -> bool {
    (a - b).abs() <= 2
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonId {
    Stay,
    Evade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Accepted,
    Rejected,
}

/// Deferred work scheduled by a relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    ShowTaunt,
    ClearStayHint,
    Relocate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Animate {
        from: Point,
        to: Point,
        duration: Duration,
    },
    Relabel {
        button: ButtonId,
        text: String,
    },
    Schedule {
        delay: Duration,
        task: Task,
    },
}

pub struct Evader<R: RandomSource = SeededRandom> {
    behavior: BehaviorConfig,
    texts: TextsConfig,
    random: R,
    exchanged: bool,
    escape_count: u32,
    last_escape_index: u32,
    #[allow(dead_code)]
    has_overlapped: bool,
    dialog: Size,
    stay: Rect,
    evade: Rect,
    stay_text: String,
    evade_text: String,
    /// Hint or taunt shown on the stay button in place of its role label.
    stay_hint: Option<String>,
    pointer: Option<Point>,
}

impl<R: RandomSource> Evader<R> {
    pub fn with_random(
        stay_label: &str,
        evade_label: &str,
        button: Size,
        behavior: BehaviorConfig,
        texts: TextsConfig,
        random: R,
    ) -> Self {
        Self {
            behavior,
            texts,
            random,
            exchanged: false,
            escape_count: 0,
            last_escape_index: 0,
            has_overlapped: false,
            dialog: Size::default(),
            stay: Rect::new(Point::default(), button),
            evade: Rect::new(Point::default(), button),
            stay_text: stay_label.to_string(),
            evade_text: evade_label.to_string(),
            stay_hint: None,
            pointer: None,
        }
    }

    pub fn exchanged(&self) -> bool {
        self.exchanged
    }

    pub fn escape_count(&self) -> u32 {
        self.escape_count
    }

    pub fn last_escape_index(&self) -> u32 {
        self.last_escape_index
    }

    pub fn stay_rect(&self) -> Rect {
        self.stay
    }

    pub fn evade_rect(&self) -> Rect {
        self.evade
    }

    /// Text currently displayed on `button`.
    pub fn label(&self, button: ButtonId) -> &str {
        match button {
            ButtonId::Stay => self.stay_hint.as_deref().unwrap_or(&self.stay_text),
            ButtonId::Evade => &self.evade_text,
        }
    }

    /// Role label of `button`, ignoring any hint shown over it.
    pub fn role_label(&self, button: ButtonId) -> &str {
        match button {
            ButtonId::Stay => &self.stay_text,
            ButtonId::Evade => &self.evade_text,
        }
    }

    fn relabel(&self, button: ButtonId) -> Effect {
        Effect::Relabel {
            button,
            text: self.label(button).to_string(),
        }
    }

    /// Uniform integer in `min..=max` from the dialog's generator.
    pub fn random(&mut self, min: i32, max: i32) -> i32 {
        self.random.random(min, max)
    }

    /// Re-anchor both buttons to the corner of a dialog of the new size.
    pub fn resize(&mut self, dialog: Size) {
        self.dialog = dialog;
        let (stay, evade) =
            layout::anchor(dialog, self.stay.size, self.evade.size, self.behavior.margin);
        self.stay = stay;
        self.evade = evade;
    }

    /// Record where the pointer is in dialog coordinates, `None` once it leaves.
    pub fn track_pointer(&mut self, pointer: Option<Point>) {
        self.pointer = pointer;
    }

    /// Keep the model in step with the evade button while it animates.
    pub fn set_evade_position(&mut self, position: Point) {
        self.evade = self.evade.moved_to(position);
    }

    /// The role follows the displayed label, not the widget.
    pub fn click(&self, button: ButtonId) -> Response {
        match (button, self.exchanged) {
            (ButtonId::Stay, false) | (ButtonId::Evade, true) => Response::Accepted,
            (ButtonId::Stay, true) | (ButtonId::Evade, false) => Response::Rejected,
        }
    }

    /// The pointer entered the evade button at `entry`, local to the button.
    pub fn pointer_entered(&mut self, entry: Point) -> Vec<Effect> {
        let effects = if self.should_swap() {
            debug!("escape_count {}: swapping buttons", self.escape_count);
            self.swap()
        } else {
            self.relocate(Some(entry))
        };

        self.escape_count += 1;
        effects
    }

    /// A swapped dialog never stays swapped once the pointer leaves.
    pub fn pointer_left(&mut self) -> Vec<Effect> {
        if self.exchanged {
            debug!("Pointer left swapped button, swapping back");
            self.swap()
        } else {
            Vec::new()
        }
    }

    pub fn run_task(&mut self, task: Task) -> Vec<Effect> {
        match task {
            Task::ShowTaunt => {
                self.stay_hint = Some(self.texts.taunt.clone());
                vec![self.relabel(ButtonId::Stay)]
            }
            Task::ClearStayHint => {
                self.stay_hint = None;
                vec![self.relabel(ButtonId::Stay)]
            }
            Task::Relocate => {
                self.last_escape_index = self.escape_count;
                debug!("Leaving hiding spot at escape_count {}", self.escape_count);
                self.relocate(None)
            }
        }
    }

    fn should_swap(&mut self) -> bool {
        let behavior = &self.behavior;
        if self.escape_count <= behavior.calm_evasions
            || self.escape_count.saturating_sub(self.last_escape_index) <= behavior.swap_cooldown
        {
            return false;
        }
        let odds = behavior.swap_odds.max(1);
        self.random.random(1, odds) == 1
    }

    /// Exchanges role labels only; a hint over the stay button stays put.
    fn swap(&mut self) -> Vec<Effect> {
        std::mem::swap(&mut self.stay_text, &mut self.evade_text);
        self.exchanged = !self.exchanged;
        self.last_escape_index = self.escape_count;
        vec![self.relabel(ButtonId::Evade), self.relabel(ButtonId::Stay)]
    }

    fn relocate(&mut self, entry: Option<Point>) -> Vec<Effect> {
        debug!("escape_count {}", self.escape_count);
        let mut effects = Vec::new();

        let target = if self.escape_count <= self.behavior.confined_evasions {
            self.confined_target(entry.unwrap_or_default())
        } else if self.behavior.hide_period > 0
            && self.escape_count % self.behavior.hide_period == self.behavior.hide_phase
        {
            self.hide_under_stay(&mut effects)
        } else {
            self.random_target()
        };

        let from = self.evade.origin;
        effects.insert(
            0,
            Effect::Animate {
                from,
                to: target,
                duration: animation_duration(from, target),
            },
        );
        effects
    }

    fn confined_target(&self, entry: Point) -> Point {
        let margin = self.behavior.margin;
        let geo = self.evade;
        let at_home = geo.top() == self.stay.top()
            && is_equal(geo.right() + margin, self.stay.left());

        if !at_home {
            return self.stay.origin + Point::new(-margin - geo.size.width, 0);
        }

        if is_equal(entry.x, geo.size.width) || is_equal(entry.y, 0) {
            geo.origin + Point::new(-margin - geo.size.width, 0)
        } else {
            geo.origin + Point::new(0, -margin - geo.size.height)
        }
    }

    fn hide_under_stay(&mut self, effects: &mut Vec<Effect>) -> Point {
        self.stay_hint = Some(self.texts.hint.clone());
        let rehide_ms = self
            .random
            .random(self.behavior.rehide_min_ms, self.behavior.rehide_max_ms);
        debug!("Hiding under the stay button for {} ms", rehide_ms);

        effects.push(self.relabel(ButtonId::Stay));
        effects.push(Effect::Schedule {
            delay: Duration::from_millis(self.behavior.taunt_delay_ms),
            task: Task::ShowTaunt,
        });
        effects.push(Effect::Schedule {
            delay: Duration::from_millis(self.behavior.restore_delay_ms),
            task: Task::ClearStayHint,
        });
        effects.push(Effect::Schedule {
            delay: Duration::from_millis(u64::try_from(rehide_ms).unwrap_or(0)),
            task: Task::Relocate,
        });

        self.stay.origin
    }

    fn random_target(&mut self) -> Point {
        let geo = self.evade;
        let (w, h) = (geo.size.width, geo.size.height);
        let mut axis_valid = None;

        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let candidate = Point::new(
                self.random.random(-w / 2, self.dialog.width - w / 2),
                self.random.random(-h / 2, self.dialog.height - h / 2),
            );
            if geo.spans_x(candidate.x) || geo.spans_y(candidate.y) {
                continue;
            }
            axis_valid = Some(candidate);
            let under_pointer = self
                .pointer
                .is_some_and(|pointer| geo.moved_to(candidate).contains(pointer));
            if !under_pointer {
                return candidate;
            }
        }

        warn!(
            "No free spot found after {} attempts in a {}x{} dialog",
            MAX_PLACEMENT_ATTEMPTS, self.dialog.width, self.dialog.height
        );
        axis_valid.unwrap_or(geo.origin)
    }
}

/// 100 ms plus the square root of the Manhattan travel distance.
pub fn animation_duration(from: Point, to: Point) -> Duration {
    let distance = f64::from((to - from).manhattan_length());
    Duration::from_millis(BASE_ANIMATION_MS + distance.sqrt() as u64)
}
