use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::NodeError;

// -----------------------------------------------------------------------------
// NodeKind

/// The structural kind of a [`Node`].
///
/// Attributes do not take part in the classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Carries scalar text and no children.
    Leaf,
    /// Carries at least one child and no text.
    Container,
    /// Carries both text and children.
    ///
    /// Only reachable by setting both on the same node. The codec rejects
    /// such nodes as malformed.
    Mixed,
    /// Carries neither text nor children.
    ///
    /// An empty string counts as "no text".
    Empty,
}

// -----------------------------------------------------------------------------
// Node

/// A named element of a document tree.
///
/// A node either holds scalar text (a leaf) or a list of children
/// (a container). The setters do not enforce that split: a node given
/// both reports [`NodeKind::Mixed`]. Attributes are independent of that
/// split and are mostly used to carry the type tag written by the codec.
///
/// Children keep their insertion order and may share names. The tree is
/// strict: a node owns its children and there are no back references.
///
/// # Examples
///
/// ```
/// use vc_node::{Node, NodeKind};
///
/// let mut list = Node::new("nums");
/// list.append("num").set_value("1");
/// list.append("num").set_value("2");
///
/// assert_eq!(list.kind(), NodeKind::Container);
/// assert_eq!(list.children_named("num").count(), 2);
/// assert_eq!(list.child("num").and_then(Node::value), Some("1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    value: Option<String>,
    attributes: BTreeMap<String, String>,
    children: Vec<Node>,
}

impl Node {
    /// Creates an empty node.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty. Use [`Node::try_new`] for untrusted names.
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        match Self::try_new(name) {
            Ok(node) => node,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates an empty node, rejecting empty names.
    pub fn try_new(name: impl Into<String>) -> Result<Self, NodeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(NodeError::EmptyName);
        }
        Ok(Self {
            name,
            value: None,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        })
    }

    /// Creates a leaf node holding `value`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    #[inline]
    pub fn leaf(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut node = Self::new(name);
        node.value = Some(value.into());
        node
    }

    /// Returns the node name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the scalar text, if any was set.
    #[inline]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Sets the scalar text.
    #[inline]
    pub fn set_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.value = Some(value.into());
        self
    }

    /// Removes and returns the scalar text.
    #[inline]
    pub fn take_value(&mut self) -> Option<String> {
        self.value.take()
    }

    /// Returns the attribute stored under `key`.
    #[inline]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Sets an attribute, replacing any previous value under `key`.
    #[inline]
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Removes the attribute stored under `key`.
    #[inline]
    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        self.attributes.remove(key)
    }

    /// Iterates over all attributes, ordered by key.
    #[inline]
    pub fn attributes(&self) -> impl ExactSizeIterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the children in insertion order.
    #[inline]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Returns the first child called `name`.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Iterates over every child called `name`, in order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Appends `child` and returns a mutable reference to it.
    pub fn push_child(&mut self, child: Node) -> &mut Node {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Appends a new empty child called `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    #[inline]
    pub fn append(&mut self, name: impl Into<String>) -> &mut Node {
        self.push_child(Node::new(name))
    }

    /// Returns `true` if the node has non-empty scalar text.
    #[inline]
    pub fn has_value(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.is_empty())
    }

    /// Returns `true` if the node has at least one child.
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns `true` if the node has neither text nor children.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.has_value() && !self.has_children()
    }

    /// Classifies the node.
    pub fn kind(&self) -> NodeKind {
        match (self.has_value(), self.has_children()) {
            (true, true) => NodeKind::Mixed,
            (false, true) => NodeKind::Container,
            (true, false) => NodeKind::Leaf,
            (false, false) => NodeKind::Empty,
        }
    }

    pub(crate) fn from_parts(
        name: String,
        value: Option<String>,
        attributes: BTreeMap<String, String>,
        children: Vec<Node>,
    ) -> Result<Self, NodeError> {
        let mut node = Self::try_new(name)?;
        node.value = value;
        node.attributes = attributes;
        node.children = children;
        Ok(node)
    }

    pub(crate) fn attribute_map(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::{Node, NodeKind};
    use crate::NodeError;

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(Node::try_new(""), Err(NodeError::EmptyName));
        assert!(Node::try_new("a").is_ok());
    }

    #[test]
    #[should_panic(expected = "node name must not be empty")]
    fn new_panics_on_empty_name() {
        let _ = Node::new("");
    }

    #[test]
    fn kinds() {
        let mut node = Node::new("n");
        assert_eq!(node.kind(), NodeKind::Empty);

        node.set_value("");
        assert_eq!(node.kind(), NodeKind::Empty);
        assert!(node.is_empty());

        node.set_value("x");
        assert_eq!(node.kind(), NodeKind::Leaf);

        let mut list = Node::new("list");
        list.append("item");
        assert_eq!(list.kind(), NodeKind::Container);

        list.set_value("text");
        assert_eq!(list.kind(), NodeKind::Mixed);
        assert!(!list.is_empty());

        list.set_value("");
        assert_eq!(list.kind(), NodeKind::Container);
    }

    #[test]
    fn attributes_do_not_affect_emptiness() {
        let mut node = Node::new("n");
        node.set_attribute("ty", "i32");
        assert!(node.is_empty());
        assert_eq!(node.attribute("ty"), Some("i32"));
        assert_eq!(node.remove_attribute("ty").as_deref(), Some("i32"));
        assert_eq!(node.attributes().len(), 0);
    }

    #[test]
    fn children_keep_order_and_duplicates() {
        let mut node = Node::new("root");
        node.push_child(Node::leaf("a", "1"));
        node.push_child(Node::leaf("b", "2"));
        node.push_child(Node::leaf("a", "3"));

        let names: std::vec::Vec<_> = node.children().iter().map(Node::name).collect();
        assert_eq!(names, ["a", "b", "a"]);

        let values: std::vec::Vec<_> = node.children_named("a").filter_map(Node::value).collect();
        assert_eq!(values, ["1", "3"]);
        assert_eq!(node.child("b").and_then(Node::value), Some("2"));
        assert!(node.child("c").is_none());
    }

    #[test]
    fn structural_equality() {
        let mut a = Node::new("n");
        a.set_attribute("k", "v").set_value("1");
        let b = a.clone();
        assert_eq!(a, b);

        let mut c = b.clone();
        c.set_value("2");
        assert_ne!(a, c);
    }
}
