//! Tab descriptors.
//!
//! A [`Tab`] is plain data: the text, icon or custom content shown in one
//! slot of the strip. Tabs are created by
//! [`TabStripController::new_tab`](crate::TabStripController::new_tab),
//! configured with the `with_*` builders and handed back to the controller,
//! which stores them in an arena and returns a [`TabKey`].
//!
//! ```
//! use tab_strip::TabStripController;
//!
//! let mut strip = TabStripController::new();
//! let tab = strip.new_tab().with_text("Inbox");
//! let key = strip.add_tab(tab).unwrap();
//! assert_eq!(strip.tab(key).and_then(|tab| tab.position()), Some(0));
//! ```

use std::{
    any::Any,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use crate::dp::Dp;

slotmap::new_key_type! {
    /// Stable handle of an attached tab. Keys stay valid across insertions
    /// and removals of other tabs, unlike positions.
    pub struct TabKey;
}

static NEXT_STRIP_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a [`TabStripController`](crate::TabStripController).
///
/// Every tab remembers the controller that created it, so attaching it to a
/// different controller can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StripId(u64);

impl StripId {
    pub(crate) fn next() -> Self {
        Self(NEXT_STRIP_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for StripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "strip#{}", self.0)
    }
}

/// Whether a tab with an icon also shows its text label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelVisibility {
    /// Text is shown next to or below the icon.
    #[default]
    Labeled,
    /// Only the icon is shown; the text stays available to hosts.
    Unlabeled,
}

/// Reference to an icon resolved by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct TabIcon {
    /// Host-side resource name.
    pub name: String,
    /// Square edge length of the icon.
    pub size: Dp,
}

impl TabIcon {
    /// Default icon size.
    pub const DEFAULT_SIZE: Dp = Dp(24.0);

    /// Creates an icon reference with the default size.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: Self::DEFAULT_SIZE,
        }
    }

    /// Overrides the icon size.
    pub fn with_size(mut self, size: Dp) -> Self {
        self.size = size;
        self
    }
}

/// Reference to host-rendered content that replaces icon and label.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomContent {
    /// Host-side content name.
    pub name: String,
    /// Intrinsic width.
    pub width: Dp,
    /// Intrinsic height.
    pub height: Dp,
}

impl CustomContent {
    /// Creates a custom content reference with its intrinsic size.
    pub fn new(name: impl Into<String>, width: Dp, height: Dp) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }
}

/// Content descriptor for one tab slot.
#[derive(Clone)]
pub struct Tab {
    owner: StripId,
    position: Option<usize>,
    text: Option<String>,
    icon: Option<TabIcon>,
    custom_content: Option<CustomContent>,
    label_visibility: LabelVisibility,
    id: Option<i32>,
    tag: Option<Arc<dyn Any + Send + Sync>>,
}

impl Tab {
    pub(crate) fn new(owner: StripId) -> Self {
        Self {
            owner,
            position: None,
            text: None,
            icon: None,
            custom_content: None,
            label_visibility: LabelVisibility::default(),
            id: None,
            tag: None,
        }
    }

    /// Sets the label text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Sets the icon.
    pub fn with_icon(mut self, icon: TabIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Replaces icon and label with host-rendered content.
    pub fn with_custom_content(mut self, content: CustomContent) -> Self {
        self.custom_content = Some(content);
        self
    }

    /// Sets whether the label is shown alongside the icon.
    pub fn with_label_visibility(mut self, visibility: LabelVisibility) -> Self {
        self.label_visibility = visibility;
        self
    }

    /// Sets a caller-chosen id.
    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    /// Attaches arbitrary caller data.
    pub fn with_tag<T: Any + Send + Sync>(mut self, tag: T) -> Self {
        self.tag = Some(Arc::new(tag));
        self
    }

    /// Replaces the label text of a tab being edited through
    /// [`TabStripController::update_tab`](crate::TabStripController::update_tab).
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Replaces or clears the icon.
    pub fn set_icon(&mut self, icon: Option<TabIcon>) {
        self.icon = icon;
    }

    /// Replaces or clears the custom content.
    pub fn set_custom_content(&mut self, content: Option<CustomContent>) {
        self.custom_content = content;
    }

    /// Changes label visibility.
    pub fn set_label_visibility(&mut self, visibility: LabelVisibility) {
        self.label_visibility = visibility;
    }

    /// Index in the strip, `None` while the tab is not attached.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Whether the tab currently lives in a strip.
    pub fn is_attached(&self) -> bool {
        self.position.is_some()
    }

    /// Label text.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Icon reference.
    pub fn icon(&self) -> Option<&TabIcon> {
        self.icon.as_ref()
    }

    /// Custom content reference.
    pub fn custom_content(&self) -> Option<&CustomContent> {
        self.custom_content.as_ref()
    }

    /// Label visibility.
    pub fn label_visibility(&self) -> LabelVisibility {
        self.label_visibility
    }

    /// Caller-chosen id.
    pub fn id(&self) -> Option<i32> {
        self.id
    }

    /// Caller data downcast to `T`.
    pub fn tag<T: Any>(&self) -> Option<&T> {
        self.tag.as_deref().and_then(|tag| tag.downcast_ref::<T>())
    }

    /// Controller that created this tab.
    pub fn owner(&self) -> StripId {
        self.owner
    }

    /// Whether the label text should be laid out.
    pub(crate) fn shows_label(&self) -> bool {
        let has_text = self.text.as_deref().is_some_and(|text| !text.is_empty());
        has_text && (self.icon.is_none() || self.label_visibility == LabelVisibility::Labeled)
    }

    pub(crate) fn set_position(&mut self, position: Option<usize>) {
        self.position = position;
    }

    /// Copy handed to listeners for a tab that has just been removed.
    pub(crate) fn detached_snapshot(&self) -> Self {
        let mut snapshot = self.clone();
        snapshot.position = None;
        snapshot
    }

    /// Clears everything but the owner so the instance can be pooled.
    pub(crate) fn reset(&mut self) {
        *self = Self::new(self.owner);
    }
}

impl fmt::Debug for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tab")
            .field("owner", &self.owner)
            .field("position", &self.position)
            .field("text", &self.text)
            .field("icon", &self.icon)
            .field("custom_content", &self.custom_content)
            .field("label_visibility", &self.label_visibility)
            .field("id", &self.id)
            .field("has_tag", &self.tag.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_keeps_owner_only() {
        let owner = StripId::next();
        let mut tab = Tab::new(owner)
            .with_text("Inbox")
            .with_icon(TabIcon::new("inbox"))
            .with_id(7)
            .with_tag(42u32);
        tab.set_position(Some(3));

        tab.reset();
        assert_eq!(tab.owner(), owner);
        assert_eq!(tab.position(), None);
        assert_eq!(tab.text(), None);
        assert!(tab.icon().is_none());
        assert_eq!(tab.id(), None);
        assert!(tab.tag::<u32>().is_none());
    }

    #[test]
    fn test_tag_downcasts_to_stored_type() {
        let tab = Tab::new(StripId::next()).with_tag(String::from("payload"));
        assert_eq!(tab.tag::<String>().map(String::as_str), Some("payload"));
        assert!(tab.tag::<u8>().is_none());
    }

    #[test]
    fn test_unlabeled_icon_tab_hides_label() {
        let owner = StripId::next();
        let labeled = Tab::new(owner).with_text("Maps").with_icon(TabIcon::new("map"));
        assert!(labeled.shows_label());

        let unlabeled = labeled
            .clone()
            .with_label_visibility(LabelVisibility::Unlabeled);
        assert!(!unlabeled.shows_label());

        let text_only = Tab::new(owner)
            .with_text("Maps")
            .with_label_visibility(LabelVisibility::Unlabeled);
        assert!(text_only.shows_label());
        assert!(!Tab::new(owner).with_text("").shows_label());
    }

    #[test]
    fn test_strip_ids_are_unique() {
        let a = StripId::next();
        let b = StripId::next();
        assert_ne!(a, b);
        assert!(a.to_string().starts_with("strip#"));
    }
}
