//! The page capabilities the carousel consumes.
//!
//! A carousel never touches a real document directly. Everything it needs
//! from the page (creating elements, assigning styles, subscribing to clicks,
//! measuring the container) goes through the [`Host`] trait. Timers are not
//! part of the host: they are `bubbletea_rs::Cmd` values returned to the
//! runtime, which feeds the resulting messages back into
//! [`Model::update`](crate::carousel::Model::update).
//!
//! [`MemoryHost`] is an in-memory element tree used for headless rendering
//! and tests.

mod memory;

pub use memory::MemoryHost;

/// Opaque handle to an element owned by a [`Host`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// Rendered size of an element's box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
}

impl Rect {
    /// Creates a rect of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether the box has no visible area.
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

/// A clickable carousel control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// The previous-slide button.
    Previous,
    /// The next-slide button.
    Next,
    /// The indicator dot for a real slide.
    Indicator(usize),
}

/// Message delivered by the host when a bound control is clicked.
///
/// The host stores one of these per subscribed element (see [`Host::listen`])
/// and hands a copy to the application every time the element is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickMsg {
    /// The carousel that bound the control.
    pub id: i64,
    /// Which control was clicked.
    pub control: Control,
}

/// Element and event capabilities provided by the embedding page.
pub trait Host {
    /// Whether `el` refers to a live element that children can be attached to.
    fn is_element(&self, el: ElementId) -> bool;

    /// The rendered box of `el`.
    fn bounding_rect(&self, el: ElementId) -> Rect;

    /// The computed value of a style property, if the host knows it.
    fn computed_style(&self, el: ElementId, property: &str) -> Option<String>;

    /// Creates a detached element with the given tag name.
    fn create_element(&mut self, tag: &str) -> ElementId;

    /// Appends `child` as the last child of `parent`.
    fn append_child(&mut self, parent: ElementId, child: ElementId);

    /// Detaches `child` from `parent`.
    fn remove_child(&mut self, parent: ElementId, child: ElementId);

    /// Sets an attribute such as `href` or `src`.
    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str);

    /// Replaces the text content of `el`.
    fn set_text(&mut self, el: ElementId, text: &str);

    /// Assigns an inline style property, including custom `--` properties.
    fn set_style(&mut self, el: ElementId, property: &str, value: &str);

    /// Adds a class to the element's class list.
    fn add_class(&mut self, el: ElementId, class: &str);

    /// Removes a class from the element's class list.
    fn remove_class(&mut self, el: ElementId, class: &str);

    /// Subscribes `el` to clicks, delivering `msg` on each one.
    fn listen(&mut self, el: ElementId, msg: ClickMsg);

    /// Removes the click subscription from `el`.
    fn unlisten(&mut self, el: ElementId);
}

impl<H: Host + ?Sized> Host for &mut H {
    fn is_element(&self, el: ElementId) -> bool {
        (**self).is_element(el)
    }

    fn bounding_rect(&self, el: ElementId) -> Rect {
        (**self).bounding_rect(el)
    }

    fn computed_style(&self, el: ElementId, property: &str) -> Option<String> {
        (**self).computed_style(el, property)
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        (**self).create_element(tag)
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        (**self).append_child(parent, child)
    }

    fn remove_child(&mut self, parent: ElementId, child: ElementId) {
        (**self).remove_child(parent, child)
    }

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) {
        (**self).set_attribute(el, name, value)
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        (**self).set_text(el, text)
    }

    fn set_style(&mut self, el: ElementId, property: &str, value: &str) {
        (**self).set_style(el, property, value)
    }

    fn add_class(&mut self, el: ElementId, class: &str) {
        (**self).add_class(el, class)
    }

    fn remove_class(&mut self, el: ElementId, class: &str) {
        (**self).remove_class(el, class)
    }

    fn listen(&mut self, el: ElementId, msg: ClickMsg) {
        (**self).listen(el, msg)
    }

    fn unlisten(&mut self, el: ElementId) {
        (**self).unlisten(el)
    }
}
