//! One-time construction of the carousel's element tree.
//!
//! The class names match the stylesheet the widget ships with, so the
//! rendered structure is:
//!
//! ```text
//! div                                   wrapper, appended to the container
//! └─ div.main_carousel_container
//!    ├─ div.carousel                    the slide strip, --itemNum: N
//!    │  ├─ a[href] > img.carousel_item   × N real slides
//!    │  └─ a[href] > img.carousel_item   synthetic copy of slide 0
//!    └─ div.carousel_bottom
//!       ├─ div.carousel_bottom_left
//!       │  ├─ div.carousel_bottom_title
//!       │  └─ div.carousel_bottom_dots > div.carousel_bottom_dot × N
//!       ├─ button.carousel_bottom_btn.carousel_left_btn
//!       └─ button.carousel_bottom_btn.carousel_right_btn
//! ```

use crate::config::CarouselConfig;
use crate::host::{ClickMsg, Control, ElementId, Host};

/// Inner container holding the strip and the bottom bar.
pub const CONTAINER_CLASS: &str = "main_carousel_container";
/// The slide strip.
pub const STRIP_CLASS: &str = "carousel";
/// Each slide image.
pub const ITEM_CLASS: &str = "carousel_item";
/// The bottom bar.
pub const BOTTOM_CLASS: &str = "carousel_bottom";
/// Caption and indicator group.
pub const BOTTOM_LEFT_CLASS: &str = "carousel_bottom_left";
/// Caption.
pub const TITLE_CLASS: &str = "carousel_bottom_title";
/// Indicator row.
pub const DOTS_CLASS: &str = "carousel_bottom_dots";
/// Each indicator.
pub const DOT_CLASS: &str = "carousel_bottom_dot";
/// Marker on the indicator of the current slide.
pub const DOT_ACTIVE_CLASS: &str = "carousel_dot_active";
/// Both navigation buttons.
pub const BUTTON_CLASS: &str = "carousel_bottom_btn";
/// Previous-slide button.
pub const PREV_BUTTON_CLASS: &str = "carousel_left_btn";
/// Next-slide button.
pub const NEXT_BUTTON_CLASS: &str = "carousel_right_btn";

/// Custom property carrying the real slide count, read by the stylesheet to size the strip.
pub const ITEM_COUNT_PROPERTY: &str = "--itemNum";
/// Custom property carrying the bottom bar color.
pub const BOTTOM_COLOR_PROPERTY: &str = "--carouselBottomColor";

/// Handles to the elements the engine updates after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elements {
    /// Wrapper appended to the container.
    pub root: ElementId,
    /// The translated slide strip.
    pub strip: ElementId,
    /// Slide anchors; the last one is the synthetic slide.
    pub slides: Vec<ElementId>,
    /// Bottom bar, carrier of the color property.
    pub bottom: ElementId,
    /// Caption element.
    pub title: ElementId,
    /// One indicator per real slide.
    pub dots: Vec<ElementId>,
    /// Previous-slide button.
    pub prev: ElementId,
    /// Next-slide button.
    pub next: ElementId,
}

fn element<H: Host + ?Sized>(host: &mut H, tag: &str, classes: &[&str]) -> ElementId {
    let el = host.create_element(tag);
    for class in classes {
        host.add_class(el, class);
    }
    el
}

fn slide<H: Host + ?Sized>(host: &mut H, href: &str, src: &str) -> ElementId {
    let anchor = host.create_element("a");
    host.set_attribute(anchor, "href", href);
    let img = element(host, "img", &[ITEM_CLASS]);
    host.set_attribute(img, "src", src);
    host.append_child(anchor, img);
    anchor
}

/// Builds the tree for `config` and attaches it to `container`.
///
/// The container gets `position: relative` unless it is already positioned.
/// The indicator for the initial slide is marked active and the caption shows
/// its title; the strip offset is left to the first transition.
pub fn build<H: Host + ?Sized>(
    host: &mut H,
    container: ElementId,
    config: &CarouselConfig,
) -> Elements {
    let position = host.computed_style(container, "position");
    if matches!(position.as_deref(), None | Some("static")) {
        host.set_style(container, "position", "relative");
    }

    let len = config.len();
    let current = config.initial_index();

    let root = host.create_element("div");
    let main = element(host, "div", &[CONTAINER_CLASS]);
    host.append_child(root, main);

    let strip = element(host, "div", &[STRIP_CLASS]);
    host.set_style(strip, ITEM_COUNT_PROPERTY, &len.to_string());
    let mut slides = Vec::with_capacity(len + 1);
    for i in 0..len {
        slides.push(slide(host, config.link(i), config.image_url(i)));
    }
    slides.push(slide(host, config.link(0), config.image_url(0)));
    for anchor in &slides {
        host.append_child(strip, *anchor);
    }
    host.append_child(main, strip);

    let bottom = element(host, "div", &[BOTTOM_CLASS]);
    let left = element(host, "div", &[BOTTOM_LEFT_CLASS]);
    let title = element(host, "div", &[TITLE_CLASS]);
    host.set_text(title, config.title(current).unwrap_or(""));
    let dots_row = element(host, "div", &[DOTS_CLASS]);
    let mut dots = Vec::with_capacity(len);
    for i in 0..len {
        let dot = element(host, "div", &[DOT_CLASS]);
        if i == current {
            host.add_class(dot, DOT_ACTIVE_CLASS);
        }
        host.append_child(dots_row, dot);
        dots.push(dot);
    }
    host.append_child(left, title);
    host.append_child(left, dots_row);
    host.append_child(bottom, left);

    let prev = element(host, "button", &[BUTTON_CLASS, PREV_BUTTON_CLASS]);
    let next = element(host, "button", &[BUTTON_CLASS, NEXT_BUTTON_CLASS]);
    host.append_child(bottom, prev);
    host.append_child(bottom, next);
    host.append_child(main, bottom);

    host.append_child(container, root);

    Elements {
        root,
        strip,
        slides,
        bottom,
        title,
        dots,
        prev,
        next,
    }
}

/// Subscribes the buttons and indicators of carousel `id` to clicks.
pub fn bind<H: Host + ?Sized>(host: &mut H, elements: &Elements, id: i64) {
    host.listen(
        elements.prev,
        ClickMsg {
            id,
            control: Control::Previous,
        },
    );
    host.listen(
        elements.next,
        ClickMsg {
            id,
            control: Control::Next,
        },
    );
    for (i, dot) in elements.dots.iter().enumerate() {
        host.listen(
            *dot,
            ClickMsg {
                id,
                control: Control::Indicator(i),
            },
        );
    }
}

/// Removes every subscription and detaches the tree from `container`.
pub fn detach<H: Host + ?Sized>(host: &mut H, container: ElementId, elements: &Elements) {
    host.unlisten(elements.prev);
    host.unlisten(elements.next);
    for dot in &elements.dots {
        host.unlisten(*dot);
    }
    host.remove_child(container, elements.root);
}
