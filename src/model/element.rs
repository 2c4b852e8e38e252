/// Deepest element nesting a document may have; the root is at depth 1.
///
/// Parsing rejects anything deeper, and the renderer stops descending here, so
/// neither recursion can exhaust the stack.
pub const MAX_DEPTH: usize = 256;

/// A node of the document tree.
///
/// Trees are built once (by [`crate::model::document::parse`] or by hand in
/// tests) and are only ever read by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Tag name, `{uri}local` when the element lives in a namespace
    pub tag: String,

    /// Attributes in source order. Display order is decided by the renderer.
    pub attributes: Vec<(String, String)>,

    /// Text before the first child element.
    /// `None` means there is no text at all, which is not the same as `Some("")`.
    pub text: Option<String>,

    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Tag name without its `{uri}` namespace prefix
    pub fn local_name(&self) -> &str {
        strip_namespace(&self.tag)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Total number of elements in this subtree, including `self`
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Element::subtree_len).sum::<usize>()
    }
}

/// Strip a leading `{uri}` from a qualified name.
///
/// Names without a closing brace are returned unchanged.
pub fn strip_namespace(name: &str) -> &str {
    if name.starts_with('{') {
        if let Some(end) = name.find('}') {
            return &name[end + 1..];
        }
    }
    name
}
