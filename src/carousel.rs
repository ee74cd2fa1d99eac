//! Infinitely looping image carousel.
//!
//! The carousel renders its slides as a horizontal strip inside a host
//! container and moves the strip to show one slide at a time. A copy of the
//! first slide sits after the last one, so moving past either end looks
//! continuous: the strip slides onto the copy and is then silently swapped
//! for the real slide (see [`crate::transition`]).
//!
//! # Basic Usage
//!
//! ```rust
//! use carousel_widget::carousel::Model;
//! use carousel_widget::config::Options;
//! use carousel_widget::host::MemoryHost;
//!
//! let mut host = MemoryHost::new();
//! let container = host.container(800.0, 240.0);
//!
//! let options = Options::new(["a.webp", "b.webp", "c.webp"])
//!     .with_titles(["Alpha", "Beta", "Gamma"]);
//! let mut carousel = Model::new(host, container, &options).unwrap();
//! assert_eq!(carousel.current_index(), 0);
//!
//! carousel.go(2, false).unwrap();
//! assert_eq!(carousel.current_index(), 2);
//! assert_eq!(carousel.strip_frame().offset.fraction(), 0.5);
//! ```
//!
//! # bubbletea-rs Integration
//!
//! Autoplay ticks and the second half of wrap transitions are commands. Hand
//! them to the runtime and forward every message back to [`Model::update`]:
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Msg};
//! use carousel_widget::carousel::Model as Carousel;
//! use carousel_widget::host::MemoryHost;
//!
//! struct App {
//!     carousel: Carousel<MemoryHost>,
//! }
//!
//! impl App {
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         // Clicks delivered by the host, key presses, autoplay ticks and
//!         // wrap follow-ups all go through the same entry point.
//!         self.carousel.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.carousel.view()
//!     }
//! }
//! ```

use crate::config::{self, CarouselConfig, Options};
use crate::error::{ConfigError, NavigationError};
use crate::host::{ClickMsg, Control, ElementId, Host};
use crate::key::KeyMap;
use crate::markup::{self, Elements, BOTTOM_COLOR_PROPERTY, DOT_ACTIVE_CLASS};
use crate::style::{css_hex, Styles};
use crate::transition::{self, Frame, Plan};
use bubbletea_rs::{batch, tick as bubbletea_tick, Cmd, KeyMsg, Msg};
use lipgloss_extras::prelude::*;
use serde_json::Value;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use unicode_width::UnicodeWidthChar;

#[cfg(test)]
mod tests;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Autoplay tick.
///
/// Each call to [`Model::set_auto_play`] moves the carousel to a new tag.
/// Ticks carrying an older tag are dropped and not re-armed, so at most one
/// tick chain is ever live.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The carousel that scheduled the tick.
    pub id: i64,
    tag: i64,
}

/// Second half of a wrap transition.
///
/// Every call to [`Model::go`] starts a new transition. A follow-up that
/// belongs to an earlier transition is dropped when it arrives.
#[derive(Debug, Clone)]
pub struct SettleMsg {
    /// The carousel that scheduled the follow-up.
    pub id: i64,
    seq: u64,
    frame: Frame,
}

/// A mounted carousel.
///
/// Owns the host it renders into. Pass `&mut host` instead of `host` to keep
/// ownership on the caller's side.
#[derive(Debug)]
pub struct Model<H: Host> {
    host: H,
    container: ElementId,
    config: CarouselConfig,
    elements: Elements,
    id: i64,
    current_index: usize,
    frame: Frame,
    autoplay: bool,
    interval: Duration,
    tag: i64,
    seq: u64,

    /// Previous/next bindings for terminal hosts.
    pub keymap: KeyMap,
    /// Glyphs and styles of [`Model::view`].
    pub styles: Styles,
    /// Maximum caption width in [`Model::view`]. Zero means unlimited.
    pub width: usize,
}

impl<H: Host> Model<H> {
    /// Validates `options`, renders into `container` and binds the controls.
    ///
    /// On failure nothing is created on the host and an error event naming the
    /// violated rule is emitted. Autoplay does not start until [`Model::init`].
    pub fn new(host: H, container: ElementId, options: &Options) -> Result<Self, ConfigError> {
        Self::from_value(host, container, &options.to_value())
    }

    /// Like [`Model::new`], for options received as untyped JSON.
    pub fn from_value(mut host: H, container: ElementId, raw: &Value) -> Result<Self, ConfigError> {
        let config = match config::validate(&host, container, raw) {
            Ok(config) => config,
            Err(err) => {
                error!(rule = err.rule(), "carousel configuration rejected: {err}");
                return Err(err);
            }
        };

        let len = config.len();
        let index = config.initial_index();
        let initial = transition::plan(index as i64, false, len).map_err(|_| {
            ConfigError::InitialIndexOutOfBounds {
                index: index.to_string(),
                len,
            }
        })?;

        let id = next_id();
        let elements = markup::build(&mut host, container, &config);
        markup::bind(&mut host, &elements, id);

        let mut model = Self {
            host,
            container,
            autoplay: config.autoplay(),
            interval: config.interval(),
            config,
            elements,
            id,
            current_index: index,
            frame: initial.frame,
            tag: 0,
            seq: 0,
            keymap: KeyMap::default(),
            styles: Styles::default(),
            width: 0,
        };
        model.apply(&initial);

        info!(id, slides = len, initial = index, "carousel mounted");
        Ok(model)
    }

    /// Sets the preview styles.
    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// Sets the key bindings.
    pub fn with_keymap(mut self, keymap: KeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Sets the maximum caption width of the preview.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Starts autoplay if the configuration asks for it.
    ///
    /// Goes through [`Model::set_auto_play`], so calling it again replaces the
    /// running tick chain instead of adding a second one.
    pub fn init(&mut self) -> Option<Cmd> {
        self.set_auto_play(self.config.autoplay(), self.config.interval())
    }

    /// Unique identifier of this carousel, carried by all of its messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The settled slide, or the target of an in-flight transition.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Number of real slides.
    pub fn len(&self) -> usize {
        self.config.len()
    }

    /// Always `false`: a carousel has at least one slide.
    pub fn is_empty(&self) -> bool {
        self.config.is_empty()
    }

    /// The strip frame most recently applied to the host.
    pub fn strip_frame(&self) -> Frame {
        self.frame
    }

    /// Whether autoplay is enabled.
    pub fn auto_play(&self) -> bool {
        self.autoplay
    }

    /// Current autoplay interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The validated configuration.
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Handles to the rendered elements.
    pub fn elements(&self) -> &Elements {
        &self.elements
    }

    /// The container the carousel is mounted in.
    pub fn container(&self) -> ElementId {
        self.container
    }

    /// The host the carousel renders into.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// A tick message for the live autoplay chain.
    pub fn tick_msg(&self) -> TickMsg {
        TickMsg {
            id: self.id,
            tag: self.tag,
        }
    }

    /// Moves to slide `target`.
    ///
    /// `target` may be `-1` or `len()` to wrap around; with `animated` these
    /// run the two-phase wrap transitions and the returned command delivers
    /// the second phase. Targets outside `-1..=len()` are rejected and leave
    /// the carousel untouched.
    pub fn go(&mut self, target: i64, animated: bool) -> Result<Option<Cmd>, NavigationError> {
        let plan = match transition::plan(target, animated, self.len()) {
            Ok(plan) => plan,
            Err(err) => {
                warn!(id = self.id, target, "navigation rejected: {err}");
                return Err(err);
            }
        };

        self.seq += 1;
        debug!(
            id = self.id,
            kind = ?plan.kind,
            from = self.current_index,
            to = plan.index,
            offset = %plan.frame.offset,
            "transition"
        );
        self.apply(&plan);

        Ok(plan.follow_up.map(|follow_up| {
            let id = self.id;
            let seq = self.seq;
            let frame = follow_up.frame;
            schedule(follow_up.delay, move || Box::new(SettleMsg { id, seq, frame }) as Msg)
        }))
    }

    /// Enables, disables or re-times autoplay.
    ///
    /// The previous tick chain is retired before anything else, so switching
    /// intervals never leaves two chains running. When `enabled`, the returned
    /// command delivers the first tick after `interval`.
    pub fn set_auto_play(&mut self, enabled: bool, interval: Duration) -> Option<Cmd> {
        self.tag += 1;
        self.autoplay = enabled;
        self.interval = interval;
        debug!(id = self.id, enabled, ?interval, tag = self.tag, "autoplay");

        if enabled {
            Some(self.tick())
        } else {
            None
        }
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        schedule(self.interval, move || Box::new(TickMsg { id, tag }) as Msg)
    }

    /// Processes clicks, key presses, autoplay ticks and wrap follow-ups.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(click) = msg.downcast_ref::<ClickMsg>() {
            if click.id != self.id {
                return None;
            }
            return self.navigate(click.control);
        }

        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.prev.matches(key) {
                return self.navigate(Control::Previous);
            }
            if self.keymap.next.matches(key) {
                return self.navigate(Control::Next);
            }
            return None;
        }

        if let Some(tick) = msg.downcast_ref::<TickMsg>() {
            if tick.id != self.id || !self.autoplay || tick.tag != self.tag {
                return None;
            }
            let follow_up = self.go(self.current_index as i64 + 1, true).ok().flatten();
            let next = self.tick();
            return Some(match follow_up {
                Some(follow_up) => batch(vec![follow_up, next]),
                None => next,
            });
        }

        if let Some(settle) = msg.downcast_ref::<SettleMsg>() {
            if settle.id != self.id {
                return None;
            }
            if settle.seq != self.seq {
                debug!(id = self.id, seq = settle.seq, "dropping superseded follow-up");
                return None;
            }
            self.apply_frame(settle.frame);
            return None;
        }

        None
    }

    fn navigate(&mut self, control: Control) -> Option<Cmd> {
        let (target, animated) = match control {
            Control::Previous => (self.current_index as i64 - 1, true),
            Control::Next => (self.current_index as i64 + 1, true),
            Control::Indicator(i) => (i as i64, false),
        };
        self.go(target, animated).ok().flatten()
    }

    fn apply(&mut self, plan: &Plan) {
        let previous = self.current_index;
        self.current_index = plan.index;
        self.apply_frame(plan.frame);
        self.present(previous);
    }

    fn apply_frame(&mut self, frame: Frame) {
        let strip = self.elements.strip;
        self.host.set_style(strip, "transition", frame.motion.css());
        self.host.set_style(strip, "transform", &frame.offset.css());
        self.frame = frame;
    }

    // Only the fields that depend on the current slide are touched.
    fn present(&mut self, previous: usize) {
        let current = self.current_index;
        if previous != current {
            if let Some(dot) = self.elements.dots.get(previous) {
                self.host.remove_class(*dot, DOT_ACTIVE_CLASS);
            }
        }
        if let Some(dot) = self.elements.dots.get(current) {
            self.host.add_class(*dot, DOT_ACTIVE_CLASS);
        }
        if let Some(color) = self.config.background_color(current) {
            self.host
                .set_style(self.elements.bottom, BOTTOM_COLOR_PROPERTY, color);
        }
        if let Some(title) = self.config.title(current) {
            self.host.set_text(self.elements.title, title);
        }
    }

    /// Renders a text preview: the caption above a row of indicator dots.
    pub fn view(&self) -> String {
        let current = self.current_index;
        let caption = self
            .config
            .title(current)
            .map(|t| truncate(t, self.width))
            .unwrap_or_default();

        let mut style = self.styles.caption.clone();
        if let Some(hex) = self.config.background_color(current).and_then(css_hex) {
            style = style.background(Color::from(hex.as_str()));
        }

        format!("{}\n{}", style.render(&caption), self.dots_view())
    }

    fn dots_view(&self) -> String {
        let mut s = String::new();
        for i in 0..self.len() {
            if i == self.current_index {
                s.push_str(&self.styles.active.render(&self.styles.active_dot));
            } else {
                s.push_str(&self.styles.inactive_dot);
            }
            if i < self.len() - 1 {
                s.push(' ');
            }
        }
        s
    }

    /// Stops autoplay, removes the controls' subscriptions and the rendered
    /// tree, and returns the host.
    ///
    /// Ticks and follow-ups still in flight have no receiver afterwards, so
    /// nothing re-arms them.
    pub fn dispose(mut self) -> H {
        markup::detach(&mut self.host, self.container, &self.elements);
        info!(id = self.id, "carousel disposed");
        self.host
    }
}

/// Shortest period the runtime's ticker accepts.
const MIN_PERIOD: Duration = Duration::from_nanos(1);

/// Longest period handed to the ticker. Its deadline arithmetic overflows on
/// durations near `Duration::MAX`.
const MAX_PERIOD: Duration = Duration::from_secs(60 * 60 * 24 * 365);

fn period(delay: Duration) -> Duration {
    delay.clamp(MIN_PERIOD, MAX_PERIOD)
}

/// Delivers `msg()` once after `delay`, with zero delays meaning the next turn.
fn schedule<F>(delay: Duration, msg: F) -> Cmd
where
    F: Fn() -> Msg + Send + 'static,
{
    bubbletea_tick(period(delay), move |_| msg())
}

fn truncate(s: &str, width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if width == 0 || total <= width {
        return s.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
