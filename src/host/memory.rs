use super::{ClickMsg, ElementId, Host, Rect};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    text: String,
    rect: Rect,
    listener: Option<ClickMsg>,
}

/// An in-memory element tree implementing [`Host`].
///
/// Elements are never freed; removed subtrees simply become detached. Newly
/// created elements have an empty box, so containers must be sized with
/// [`MemoryHost::container`] or [`MemoryHost::set_rect`].
///
/// # Examples
///
/// ```rust
/// use carousel_widget::host::{Host, MemoryHost};
///
/// let mut host = MemoryHost::new();
/// let root = host.container(640.0, 200.0);
/// let child = host.create_element("div");
/// host.add_class(child, "banner");
/// host.append_child(root, child);
///
/// assert_eq!(host.query(root, "banner"), vec![child]);
/// assert_eq!(host.to_html(root), "<div><div class=\"banner\"></div></div>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    nodes: Vec<Node>,
}

impl MemoryHost {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detached `div` with the given rendered size.
    pub fn container(&mut self, width: f64, height: f64) -> ElementId {
        let el = self.create_element("div");
        self.set_rect(el, Rect::new(width, height));
        el
    }

    /// Overrides the rendered box of `el`.
    pub fn set_rect(&mut self, el: ElementId, rect: Rect) {
        if let Some(node) = self.nodes.get_mut(el.0) {
            node.rect = rect;
        }
    }

    /// Tag name of `el`.
    pub fn tag(&self, el: ElementId) -> Option<&str> {
        self.nodes.get(el.0).map(|n| n.tag.as_str())
    }

    /// Children of `el` in order.
    pub fn children(&self, el: ElementId) -> &[ElementId] {
        self.nodes
            .get(el.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Parent of `el`, if attached.
    pub fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.nodes.get(el.0).and_then(|n| n.parent)
    }

    /// Text content of `el`.
    pub fn text(&self, el: ElementId) -> &str {
        self.nodes.get(el.0).map(|n| n.text.as_str()).unwrap_or("")
    }

    /// Value of an attribute on `el`.
    pub fn attribute(&self, el: ElementId, name: &str) -> Option<&str> {
        self.nodes
            .get(el.0)
            .and_then(|n| n.attributes.get(name))
            .map(String::as_str)
    }

    /// Inline style property of `el`.
    pub fn style(&self, el: ElementId, property: &str) -> Option<&str> {
        self.nodes
            .get(el.0)
            .and_then(|n| n.style.get(property))
            .map(String::as_str)
    }

    /// Whether `el` carries `class`.
    pub fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.nodes
            .get(el.0)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    /// Descendants of `root` carrying `class`, in document order.
    pub fn query(&self, root: ElementId, class: &str) -> Vec<ElementId> {
        let mut found = Vec::new();
        let mut stack: Vec<ElementId> = self.children(root).iter().rev().copied().collect();
        while let Some(el) = stack.pop() {
            if self.has_class(el, class) {
                found.push(el);
            }
            stack.extend(self.children(el).iter().rev().copied());
        }
        found
    }

    /// Simulates a click, returning the message the subscription delivers.
    pub fn click(&self, el: ElementId) -> Option<ClickMsg> {
        self.nodes.get(el.0).and_then(|n| n.listener.clone())
    }

    /// Number of elements with a live click subscription.
    pub fn listener_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.listener.is_some()).count()
    }

    /// Serializes the subtree rooted at `el`.
    ///
    /// Attributes are emitted as `class`, then `style` (properties sorted by
    /// name), then the remaining attributes sorted by name. `img` is a void
    /// element.
    pub fn to_html(&self, el: ElementId) -> String {
        let mut out = String::new();
        self.write_html(el, &mut out);
        out
    }

    fn write_html(&self, el: ElementId, out: &mut String) {
        let Some(node) = self.nodes.get(el.0) else {
            return;
        };
        out.push('<');
        out.push_str(&node.tag);
        if !node.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape(&node.classes.join(" "))));
        }
        if !node.style.is_empty() {
            let style: Vec<String> = node
                .style
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect();
            out.push_str(&format!(" style=\"{}\"", escape(&style.join("; "))));
        }
        for (name, value) in &node.attributes {
            out.push_str(&format!(" {name}=\"{}\"", escape(value)));
        }
        out.push('>');
        if node.tag == "img" {
            return;
        }
        out.push_str(&escape(&node.text));
        for child in &node.children {
            self.write_html(*child, out);
        }
        out.push_str(&format!("</{}>", node.tag));
    }

    fn node_mut(&mut self, el: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(el.0)
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl Host for MemoryHost {
    fn is_element(&self, el: ElementId) -> bool {
        el.0 < self.nodes.len()
    }

    fn bounding_rect(&self, el: ElementId) -> Rect {
        self.nodes.get(el.0).map(|n| n.rect).unwrap_or_default()
    }

    fn computed_style(&self, el: ElementId, property: &str) -> Option<String> {
        let node = self.nodes.get(el.0)?;
        match node.style.get(property) {
            Some(value) => Some(value.clone()),
            None if property == "position" => Some("static".to_string()),
            None => None,
        }
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.push(Node {
            tag: tag.to_string(),
            ..Node::default()
        });
        ElementId(self.nodes.len() - 1)
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if !self.is_element(parent) || !self.is_element(child) {
            return;
        }
        let previous = self.nodes[child.0].parent;
        if let Some(old) = previous {
            self.remove_child(old, child);
        }
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    fn remove_child(&mut self, parent: ElementId, child: ElementId) {
        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|c| *c != child);
        }
        if let Some(node) = self.node_mut(child) {
            if node.parent == Some(parent) {
                node.parent = None;
            }
        }
    }

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(el) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        if let Some(node) = self.node_mut(el) {
            node.text = text.to_string();
        }
    }

    fn set_style(&mut self, el: ElementId, property: &str, value: &str) {
        if let Some(node) = self.node_mut(el) {
            node.style.insert(property.to_string(), value.to_string());
        }
    }

    fn add_class(&mut self, el: ElementId, class: &str) {
        if let Some(node) = self.node_mut(el) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, el: ElementId, class: &str) {
        if let Some(node) = self.node_mut(el) {
            node.classes.retain(|c| c != class);
        }
    }

    fn listen(&mut self, el: ElementId, msg: ClickMsg) {
        if let Some(node) = self.node_mut(el) {
            node.listener = Some(msg);
        }
    }

    fn unlisten(&mut self, el: ElementId) {
        if let Some(node) = self.node_mut(el) {
            node.listener = None;
        }
    }
}
