#![warn(missing_docs)]

//! # carousel-widget
//!
//! An image carousel component with autoplay, previous/next controls,
//! indicator dots, captions, per-slide background colors and click-through
//! links. Moving past the last slide (or before the first) looks continuous:
//! a copy of the first slide trails the strip and absorbs the wrap.
//!
//! ## Overview
//!
//! The carousel follows the Elm Architecture used by bubbletea-rs components:
//! a [`carousel::Model`] is created once, [`carousel::Model::init`] returns the
//! first autoplay command, and [`carousel::Model::update`] consumes every
//! message (clicks, key presses, autoplay ticks, wrap follow-ups) and may
//! return the next command.
//!
//! The page itself is abstracted behind the [`host::Host`] trait: element
//! creation, style assignment, click subscriptions and container measurement.
//! [`host::MemoryHost`] implements it as an in-memory element tree.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Construction options and their eight-step validation |
//! | [`transition`] | The four transition shapes and strip offsets |
//! | [`carousel`] | The engine: navigation, autoplay, presentation updates |
//! | [`markup`] | One-time element tree construction and click binding |
//! | [`host`] | Page capabilities and the in-memory host |
//! | [`key`] | Key bindings for terminal hosts |
//! | [`style`] | Styles of the text preview |
//! | [`error`] | Configuration and navigation errors |
//!
//! ## Quick Start
//!
//! ```rust
//! use carousel_widget::prelude::*;
//!
//! let mut host = MemoryHost::new();
//! let container = host.container(960.0, 280.0);
//!
//! let options = Options::new(["cover0.webp", "cover1.webp", "cover2.webp"])
//!     .with_titles(["One", "Two", "Three"])
//!     .with_background_colors(["rgb(115, 58, 74)", "#323955", "#93589b"])
//!     .with_interval_ms(3000);
//!
//! let mut carousel = Carousel::new(host, container, &options).unwrap();
//! let _autoplay = carousel.init();
//!
//! // Previous on the first slide wraps to the last one.
//! let follow_up = carousel.go(-1, true).unwrap();
//! assert!(follow_up.is_some());
//! assert_eq!(carousel.current_index(), 2);
//!
//! assert!(carousel.go(9, false).is_err());
//! assert_eq!(carousel.current_index(), 2);
//! ```
//!
//! ## Diagnostics
//!
//! Rejected configurations and out-of-range navigation are reported through
//! `tracing` events in addition to the returned errors. Install any
//! subscriber to see them.

pub mod carousel;
pub mod config;
pub mod error;
pub mod host;
pub mod key;
pub mod markup;
pub mod style;
pub mod transition;

pub use carousel::{Model as Carousel, SettleMsg, TickMsg};
pub use config::{CarouselConfig, Options};
pub use error::{ConfigError, Field, NavigationError};
pub use host::{ClickMsg, Control, ElementId, Host, MemoryHost, Rect};

/// Prelude module for convenient imports.
///
/// ```rust
/// use carousel_widget::prelude::*;
///
/// let mut host = MemoryHost::new();
/// let container = host.container(320.0, 120.0);
/// let carousel = Carousel::new(host, container, &Options::new(["a.webp"])).unwrap();
/// assert_eq!(carousel.len(), 1);
/// ```
pub mod prelude {
    pub use crate::carousel::{Model as Carousel, SettleMsg, TickMsg};
    pub use crate::config::{CarouselConfig, Options};
    pub use crate::error::{ConfigError, NavigationError};
    pub use crate::host::{ClickMsg, Control, ElementId, Host, MemoryHost, Rect};
    pub use crate::key::{Binding, KeyMap};
    pub use crate::style::Styles;
    pub use crate::transition::{Frame, Kind, Motion, Offset};
}
