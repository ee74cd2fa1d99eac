//! Construction options and their validation.
//!
//! [`Options`] is what a caller hands to the carousel. It serializes to the
//! same camelCase object a page script would pass, so hosts that receive
//! options as untyped JSON can validate that value directly with
//! [`validate`]. Validation runs eight checks in a fixed order and stops at
//! the first failure:
//!
//! 1. the container is a live element
//! 2. `imageUrls` is a non-empty list of strings
//! 3. `backgroundColors`, `titles` and `links`, when present, are lists of strings
//! 4. `initialIndex` names a real slide
//! 5. `autoplay` is a boolean
//! 6. `intervalMs` is a non-negative number
//! 7. every present optional list has one entry per image
//! 8. the container's rendered box is not empty
//!
//! # Examples
//!
//! ```rust
//! use carousel_widget::config::Options;
//! use carousel_widget::host::MemoryHost;
//!
//! let mut host = MemoryHost::new();
//! let container = host.container(800.0, 240.0);
//!
//! let options = Options::new(["a.webp", "b.webp"])
//!     .with_titles(["First", "Second"])
//!     .with_interval_ms(5000);
//! let config = options.validate(&host, container).unwrap();
//!
//! assert_eq!(config.len(), 2);
//! assert_eq!(config.title(1), Some("Second"));
//! assert_eq!(config.link(0), "");
//! ```

use crate::error::{ConfigError, Field};
use crate::host::{ElementId, Host};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

/// Autoplay interval used when none is given.
pub const DEFAULT_INTERVAL_MS: i64 = 3000;

/// Raw carousel construction arguments.
///
/// Defaults: autoplay on, a 3000 ms interval and initial slide 0. Numeric
/// fields are signed so that out-of-range input reaches validation instead
/// of being unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Image URL per slide, in display order.
    pub image_urls: Vec<String>,
    /// Optional caption per slide.
    pub titles: Option<Vec<String>>,
    /// Optional bottom-bar color per slide, as CSS color strings.
    pub background_colors: Option<Vec<String>>,
    /// Optional click-through URL per slide.
    pub links: Option<Vec<String>>,
    /// Whether autoplay starts on `init`.
    pub autoplay: bool,
    /// Autoplay interval in milliseconds.
    pub interval_ms: i64,
    /// Slide shown first.
    pub initial_index: i64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            image_urls: Vec::new(),
            titles: None,
            background_colors: None,
            links: None,
            autoplay: true,
            interval_ms: DEFAULT_INTERVAL_MS,
            initial_index: 0,
        }
    }
}

fn collect<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

impl Options {
    /// Creates options for the given images with every other field defaulted.
    pub fn new<I, S>(image_urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            image_urls: collect(image_urls),
            ..Self::default()
        }
    }

    /// Sets the caption list.
    pub fn with_titles<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.titles = Some(collect(titles));
        self
    }

    /// Sets the background color list.
    pub fn with_background_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.background_colors = Some(collect(colors));
        self
    }

    /// Sets the link list.
    pub fn with_links<I, S>(mut self, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.links = Some(collect(links));
        self
    }

    /// Enables or disables autoplay.
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Sets the autoplay interval in milliseconds.
    pub fn with_interval_ms(mut self, interval_ms: i64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Sets the initially displayed slide.
    pub fn with_initial_index(mut self, index: i64) -> Self {
        self.initial_index = index;
        self
    }

    /// Parses options from a JSON object with camelCase keys.
    ///
    /// Only the shape is checked here; the rules are applied by
    /// [`Options::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The options as the untyped object a page script would pass.
    pub fn to_value(&self) -> Value {
        json!({
            "imageUrls": self.image_urls,
            "titles": self.titles,
            "backgroundColors": self.background_colors,
            "links": self.links,
            "autoplay": self.autoplay,
            "intervalMs": self.interval_ms,
            "initialIndex": self.initial_index,
        })
    }

    /// Validates these options against `container`.
    pub fn validate<H: Host + ?Sized>(
        &self,
        host: &H,
        container: ElementId,
    ) -> Result<CarouselConfig, ConfigError> {
        validate(host, container, &self.to_value())
    }
}

/// Validated, immutable carousel configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    image_urls: Vec<String>,
    titles: Option<Vec<String>>,
    background_colors: Option<Vec<String>>,
    links: Option<Vec<String>>,
    autoplay: bool,
    interval: Duration,
    initial_index: usize,
}

impl CarouselConfig {
    /// Number of real slides. Always at least one.
    pub fn len(&self) -> usize {
        self.image_urls.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.image_urls.is_empty()
    }

    /// Image URL of slide `index`.
    pub fn image_url(&self, index: usize) -> &str {
        self.image_urls.get(index).map(String::as_str).unwrap_or("")
    }

    /// Caption of slide `index`, when captions are configured.
    pub fn title(&self, index: usize) -> Option<&str> {
        entry(&self.titles, index)
    }

    /// Background color of slide `index`, when colors are configured.
    pub fn background_color(&self, index: usize) -> Option<&str> {
        entry(&self.background_colors, index)
    }

    /// Link of slide `index`, or an empty string when links are not configured.
    pub fn link(&self, index: usize) -> &str {
        entry(&self.links, index).unwrap_or("")
    }

    /// Whether autoplay starts on `init`.
    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    /// Autoplay interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Slide shown first.
    pub fn initial_index(&self) -> usize {
        self.initial_index
    }
}

fn entry(seq: &Option<Vec<String>>, index: usize) -> Option<&str> {
    seq.as_ref()
        .and_then(|s| s.get(index))
        .map(String::as_str)
}

fn strings(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

/// Whether `value` leaves an optional list unconfigured: `null`, `false`, `0` or `""`.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn optional_sequence(raw: &Value, field: Field) -> Result<Option<Vec<String>>, ConfigError> {
    match raw.get(field.key()) {
        None => Ok(None),
        Some(value) if is_falsy(value) => Ok(None),
        Some(value) => strings(value)
            .map(Some)
            .ok_or(ConfigError::NotASequence { field }),
    }
}

fn initial_index(value: Option<&Value>, len: usize) -> Result<usize, ConfigError> {
    let Some(value) = value else {
        return Ok(0);
    };
    value
        .as_u64()
        .and_then(|i| usize::try_from(i).ok())
        .filter(|i| *i < len)
        .ok_or_else(|| ConfigError::InitialIndexOutOfBounds {
            index: value.to_string(),
            len,
        })
}

fn interval(value: Option<&Value>) -> Result<Duration, ConfigError> {
    let Some(value) = value else {
        return Ok(Duration::from_millis(DEFAULT_INTERVAL_MS as u64));
    };
    if let Some(ms) = value.as_u64() {
        return Ok(Duration::from_millis(ms));
    }
    match value.as_f64() {
        Some(ms) if ms.is_finite() && ms >= 0.0 => {
            Ok(Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::MAX))
        }
        _ => Err(ConfigError::InvalidInterval(value.to_string())),
    }
}

/// Validates untyped construction arguments against `container`.
///
/// `raw` is an object with the camelCase keys of [`Options`]. Missing keys
/// take their defaults and falsy optional lists (`null`, `false`, `0`, `""`)
/// count as absent. The first violated rule is returned; nothing is created
/// on the host either way.
pub fn validate<H: Host + ?Sized>(
    host: &H,
    container: ElementId,
    raw: &Value,
) -> Result<CarouselConfig, ConfigError> {
    if !host.is_element(container) {
        return Err(ConfigError::InvalidContainer);
    }

    let image_urls = raw
        .get("imageUrls")
        .and_then(strings)
        .filter(|urls| !urls.is_empty())
        .ok_or(ConfigError::InvalidImageUrls)?;
    let len = image_urls.len();

    let background_colors = optional_sequence(raw, Field::BackgroundColors)?;
    let titles = optional_sequence(raw, Field::Titles)?;
    let links = optional_sequence(raw, Field::Links)?;

    let initial_index = initial_index(raw.get("initialIndex"), len)?;

    let autoplay = match raw.get("autoplay") {
        None => true,
        Some(Value::Bool(b)) => *b,
        Some(_) => return Err(ConfigError::AutoplayNotBoolean),
    };

    let interval = interval(raw.get("intervalMs"))?;

    for (field, seq) in [
        (Field::BackgroundColors, &background_colors),
        (Field::Titles, &titles),
        (Field::Links, &links),
    ] {
        if let Some(seq) = seq {
            if seq.len() != len {
                return Err(ConfigError::LengthMismatch {
                    field,
                    expected: len,
                    actual: seq.len(),
                });
            }
        }
    }

    let rect = host.bounding_rect(container);
    if rect.is_empty() {
        return Err(ConfigError::ContainerHidden {
            width: rect.width,
            height: rect.height,
        });
    }

    Ok(CarouselConfig {
        image_urls,
        titles,
        background_colors,
        links,
        autoplay,
        interval,
        initial_index,
    })
}
