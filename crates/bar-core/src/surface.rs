// File: crates/bar-core/src/surface.rs
// Summary: Drawing-surface capability trait and `Scene`, a retained in-memory element tree implementing it.
// Notes:
// - Handles are opaque `NodeId`s carrying a slot generation. Slots of removed
//   elements are recycled under a new generation, so a stale handle stays dead
//   and every operation on it is a no-op.
// - Classes live in the `class` attribute as whitespace-separated tokens.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub fn index(self) -> usize { self.index as usize }
}

/// Element kinds the chart draws with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    /// Host-owned container the canvas is attached to.
    Container,
    Svg,
    Group,
    Rect,
    Line,
    Path,
    Text,
}

impl Tag {
    pub fn name(self) -> &'static str {
        match self {
            Tag::Container => "div",
            Tag::Svg => "svg",
            Tag::Group => "g",
            Tag::Rect => "rect",
            Tag::Line => "line",
            Tag::Path => "path",
            Tag::Text => "text",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transform {
    Translate(f64, f64),
    /// Degrees, clockwise in screen space.
    Rotate(f64),
}

#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Number(f64),
    Text(String),
    /// Length relative to the element's font size.
    Em(f64),
    Transform(Transform),
}

impl AttrValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_transform(&self) -> Option<Transform> {
        match self {
            AttrValue::Transform(t) => Some(*t),
            _ => None,
        }
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self { AttrValue::Number(v) }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self { AttrValue::Text(s.to_string()) }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self { AttrValue::Text(s) }
}

impl From<Transform> for AttrValue {
    fn from(t: Transform) -> Self { AttrValue::Transform(t) }
}

/// Number formatting used in markup: integral values print without a fraction.
pub(crate) fn fmt_num(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
    } else if v == 0.0 {
        "0".to_string()
    } else {
        format!("{v}")
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Transform::Translate(x, y) => write!(f, "translate({},{})", fmt_num(x), fmt_num(y)),
            Transform::Rotate(deg) => write!(f, "rotate({})", fmt_num(deg)),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Number(v) => f.write_str(&fmt_num(*v)),
            AttrValue::Text(s) => f.write_str(s),
            AttrValue::Em(v) => write!(f, "{}em", fmt_num(*v)),
            AttrValue::Transform(t) => t.fmt(f),
        }
    }
}

/// Capabilities the renderer needs from a drawing surface.
pub trait Surface {
    /// Create a `tag` element as the last child of `parent`.
    fn append(&mut self, parent: NodeId, tag: Tag) -> NodeId;
    /// Create a `tag` element under `parent`, placed before its child `before`.
    /// Falls back to appending when `before` is not a child of `parent`.
    fn insert_before(&mut self, parent: NodeId, tag: Tag, before: NodeId) -> NodeId;
    /// Detach and drop `node` and its whole subtree.
    fn remove(&mut self, node: NodeId);
    fn set_attr(&mut self, node: NodeId, name: &str, value: AttrValue);
    fn set_style(&mut self, node: NodeId, name: &str, value: &str);
    fn set_text(&mut self, node: NodeId, text: &str);
    fn attr(&self, node: NodeId, name: &str) -> Option<&AttrValue>;
    fn children(&self, node: NodeId) -> Vec<NodeId>;
    fn contains(&self, node: NodeId) -> bool;
    /// Descendants of `scope` (document order, `scope` excluded) carrying `class`.
    fn select_all(&self, scope: NodeId, class: &str) -> Vec<NodeId>;

    fn set_class(&mut self, node: NodeId, class: &str) {
        self.set_attr(node, "class", AttrValue::from(class));
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) tag: Tag,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) attrs: Vec<(String, AttrValue)>,
    pub(crate) styles: Vec<(String, String)>,
    pub(crate) text: Option<String>,
}

impl Node {
    fn new(tag: Tag, parent: Option<NodeId>) -> Self {
        Self { tag, parent, children: Vec::new(), attrs: Vec::new(), styles: Vec::new(), text: None }
    }

    fn has_class(&self, class: &str) -> bool {
        self.attrs
            .iter()
            .find(|(k, _)| k == "class")
            .and_then(|(_, v)| v.as_text())
            .is_some_and(|c| c.split_whitespace().any(|t| t == class))
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Retained element tree. The root is the host container.
#[derive(Clone, Debug)]
pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            slots: vec![Slot { generation: 0, node: Some(Node::new(Tag::Container, None)) }],
            free: Vec::new(),
            root: NodeId { index: 0, generation: 0 },
        }
    }

    /// The host container handle.
    pub fn root(&self) -> NodeId { self.root }

    pub(crate) fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index())
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index())
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_mut())
    }

    fn alloc(&mut self, tag: Tag, parent: Option<NodeId>) -> NodeId {
        let node = Some(Node::new(tag, parent));
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = node;
                NodeId { index, generation: slot.generation }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, node });
                NodeId { index, generation: 0 }
            }
        }
    }

    /// Free the slot; `id` and every earlier handle to it go stale.
    fn release(&mut self, id: NodeId) {
        let slot = &mut self.slots[id.index()];
        slot.node = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
    }

    fn live(&self) -> impl Iterator<Item = &Node> + '_ {
        self.slots.iter().filter_map(|s| s.node.as_ref())
    }

    /// Allocated slots, live or free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn tag(&self, id: NodeId) -> Option<Tag> {
        self.node(id).map(|n| n.tag)
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(|n| n.text.as_deref())
    }

    pub fn style(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)?
            .styles
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attr_number(&self, id: NodeId, name: &str) -> Option<f64> {
        self.attr(id, name).and_then(AttrValue::as_number)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).is_some_and(|n| n.has_class(class))
    }

    /// Number of live elements carrying `class` anywhere in the tree.
    pub fn count_class(&self, class: &str) -> usize {
        self.live().filter(|n| n.has_class(class)).count()
    }

    /// Number of live elements, the container included.
    pub fn len(&self) -> usize {
        self.live().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// First element with `tag` in document order.
    pub fn find_tag(&self, tag: Tag) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = self.node(id)?;
            if node.tag == tag {
                return Some(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    fn collect_descendants(&self, scope: NodeId, out: &mut Vec<NodeId>) {
        if let Some(node) = self.node(scope) {
            for &child in &node.children {
                out.push(child);
                self.collect_descendants(child, out);
            }
        }
    }

    /// `scope` and its descendants in document order.
    pub fn subtree(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if self.contains(scope) {
            out.push(scope);
            self.collect_descendants(scope, &mut out);
        }
        out
    }
}

impl Surface for Scene {
    fn append(&mut self, parent: NodeId, tag: Tag) -> NodeId {
        if !self.contains(parent) {
            log::warn!("append to removed element {:?}; returning a dead {} handle", parent, tag.name());
            let id = self.alloc(tag, None);
            self.release(id);
            return id;
        }
        let id = self.alloc(tag, Some(parent));
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        }
        id
    }

    fn insert_before(&mut self, parent: NodeId, tag: Tag, before: NodeId) -> NodeId {
        let pos = self
            .node(parent)
            .and_then(|p| p.children.iter().position(|&c| c == before));
        match pos {
            Some(pos) => {
                let id = self.alloc(tag, Some(parent));
                if let Some(p) = self.node_mut(parent) {
                    p.children.insert(pos, id);
                }
                id
            }
            None => self.append(parent, tag),
        }
    }

    fn remove(&mut self, node: NodeId) {
        if node == self.root || !self.contains(node) {
            return;
        }
        if let Some(parent) = self.node(node).and_then(|n| n.parent) {
            if let Some(p) = self.node_mut(parent) {
                p.children.retain(|&c| c != node);
            }
        }
        for id in self.subtree(node) {
            self.release(id);
        }
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: AttrValue) {
        if let Some(n) = self.node_mut(node) {
            match n.attrs.iter_mut().find(|(k, _)| k == name) {
                Some(slot) => slot.1 = value,
                None => n.attrs.push((name.to_string(), value)),
            }
        }
    }

    fn set_style(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(n) = self.node_mut(node) {
            match n.styles.iter_mut().find(|(k, _)| k == name) {
                Some(slot) => slot.1 = value.to_string(),
                None => n.styles.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(n) = self.node_mut(node) {
            n.text = Some(text.to_string());
        }
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<&AttrValue> {
        self.node(node)?
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn contains(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    fn select_all(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        let mut all = Vec::new();
        self.collect_descendants(scope, &mut all);
        all.retain(|&id| self.has_class(id, class));
        all
    }
}
