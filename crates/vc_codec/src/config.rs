use alloc::borrow::Cow;

/// Settings shared by every encode and decode call of a [`Codec`](crate::Codec).
///
/// # Examples
///
/// ```
/// use vc_codec::CodecConfig;
///
/// let config = CodecConfig::new().with_type_tag("type").with_max_depth(16);
/// assert_eq!(config.type_tag(), "type");
/// assert_eq!(config.item_name(), "item");
/// assert_eq!(config.max_depth(), 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    type_tag: Cow<'static, str>,
    item_name: Cow<'static, str>,
    max_depth: usize,
}

impl CodecConfig {
    /// Attribute that carries the type tag, `"ty"`.
    pub const DEFAULT_TYPE_TAG: &'static str = "ty";
    /// Name of sequence elements when the container name has no plural form, `"item"`.
    pub const DEFAULT_ITEM_NAME: &'static str = "item";
    /// Maximum nesting depth, `128`.
    pub const DEFAULT_MAX_DEPTH: usize = 128;

    /// Creates the default configuration.
    #[inline]
    pub const fn new() -> Self {
        Self {
            type_tag: Cow::Borrowed(Self::DEFAULT_TYPE_TAG),
            item_name: Cow::Borrowed(Self::DEFAULT_ITEM_NAME),
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the attribute name used for type tags.
    ///
    /// # Panics
    ///
    /// Panics if `tag` is empty.
    pub fn with_type_tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        let tag = tag.into();
        assert!(!tag.is_empty(), "type tag attribute name must not be empty");
        self.type_tag = tag;
        self
    }

    /// Sets the fallback name of sequence elements.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub fn with_item_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "item name must not be empty");
        self.item_name = name;
        self
    }

    /// Sets the maximum nesting depth.
    #[inline]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[inline]
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    #[inline]
    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    #[inline]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for CodecConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::CodecConfig;
    use alloc::string::String;

    #[test]
    fn defaults() {
        let config = CodecConfig::default();
        assert_eq!(config.type_tag(), "ty");
        assert_eq!(config.item_name(), "item");
        assert_eq!(config.max_depth(), 128);
    }

    #[test]
    fn owned_names() {
        let config = CodecConfig::new().with_item_name(String::from("entry"));
        assert_eq!(config.item_name(), "entry");
    }

    #[test]
    #[should_panic(expected = "type tag attribute name must not be empty")]
    fn empty_tag_panics() {
        let _ = CodecConfig::new().with_type_tag("");
    }
}
