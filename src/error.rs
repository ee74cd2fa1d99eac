//! Error types reported by the carousel.
//!
//! There are exactly two failure classes. [`ConfigError`] aborts construction
//! and leaves nothing rendered. [`NavigationError`] rejects a single `go`
//! call and leaves the displayed slide unchanged.

use std::fmt;
use thiserror::Error;

/// One of the optional per-slide sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Background colors for the bottom bar.
    BackgroundColors,
    /// Caption titles.
    Titles,
    /// Click-through link URLs.
    Links,
}

impl Field {
    /// The option key used for this sequence in serialized [`Options`](crate::config::Options).
    pub fn key(self) -> &'static str {
        match self {
            Field::BackgroundColors => "backgroundColors",
            Field::Titles => "titles",
            Field::Links => "links",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A violated construction precondition. The first failing rule wins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The container reference is not a live element.
    #[error("container is not an attachable element")]
    InvalidContainer,
    /// The image URL list is missing, not a list of strings, or empty.
    #[error("imageUrls must be a non-empty list of strings")]
    InvalidImageUrls,
    /// An optional per-slide sequence was provided but is not a list of strings.
    #[error("{field} must be a list of strings")]
    NotASequence {
        /// The offending sequence.
        field: Field,
    },
    /// The initial index does not name a real slide.
    #[error("initial index {index} is outside 0..{len}")]
    InitialIndexOutOfBounds {
        /// The rejected value as supplied.
        index: String,
        /// Number of real slides.
        len: usize,
    },
    /// The autoplay flag is not a boolean.
    #[error("autoplay must be a boolean")]
    AutoplayNotBoolean,
    /// The autoplay interval is not a non-negative number of milliseconds.
    #[error("autoplay interval must be a non-negative number of milliseconds, got {0}")]
    InvalidInterval(String),
    /// An optional per-slide sequence does not have one entry per image.
    #[error("{field} has {actual} entries but there are {expected} images")]
    LengthMismatch {
        /// The offending sequence.
        field: Field,
        /// Number of images.
        expected: usize,
        /// Number of entries supplied.
        actual: usize,
    },
    /// The container has a zero-sized rendered box.
    #[error("container is not visible ({width}x{height})")]
    ContainerHidden {
        /// Rendered width.
        width: f64,
        /// Rendered height.
        height: f64,
    },
}

impl ConfigError {
    /// Position of the violated rule in the validation order, starting at 1.
    pub fn rule(&self) -> u8 {
        match self {
            ConfigError::InvalidContainer => 1,
            ConfigError::InvalidImageUrls => 2,
            ConfigError::NotASequence { .. } => 3,
            ConfigError::InitialIndexOutOfBounds { .. } => 4,
            ConfigError::AutoplayNotBoolean => 5,
            ConfigError::InvalidInterval(_) => 6,
            ConfigError::LengthMismatch { .. } => 7,
            ConfigError::ContainerHidden { .. } => 8,
        }
    }
}

/// A `go` target outside `-1..=len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("slide index {target} is outside -1..={len}")]
pub struct NavigationError {
    /// The rejected target.
    pub target: i64,
    /// Number of real slides.
    pub len: usize,
}
