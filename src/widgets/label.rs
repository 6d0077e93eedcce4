//! Label - Display a text string.
//!
//! A pure display widget. Cannot have children.

use crate::engine::arrays::text as text_arrays;
use crate::types::WidgetKind;

use super::{AsWidget, BaseProps, Widget};

/// Properties for [`Label`].
#[derive(Debug, Clone, Default)]
pub struct LabelProps {
    /// Text to display. May contain newlines.
    pub text: String,
    pub base: BaseProps,
}

/// Text display widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label {
    widget: Widget,
}

impl Label {
    /// Create a label from props.
    pub fn new(props: LabelProps) -> Self {
        let widget = Widget::allocate(WidgetKind::Label, props.base.name.as_deref());
        props.base.apply(widget);
        let label = Self { widget };
        label.set_text(props.text);
        label
    }

    /// Create a label showing `text` with default props.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(LabelProps {
            text: text.into(),
            ..Default::default()
        })
    }

    /// Current text.
    pub fn text(&self) -> String {
        if self.widget.is_alive() {
            text_arrays::get_text(self.widget.index())
        } else {
            String::new()
        }
    }

    pub fn set_text(&self, text: impl Into<String>) {
        if let Ok(index) = self.widget.live_index() {
            text_arrays::set_text(index, text.into());
        }
    }

    pub fn widget(&self) -> Widget {
        self.widget
    }
}

impl AsWidget for Label {
    fn as_widget(&self) -> Widget {
        self.widget
    }
}

impl From<Label> for Widget {
    fn from(label: Label) -> Self {
        label.widget
    }
}

impl super::IntoChild for Label {
    fn into_child(self) -> Option<Widget> {
        Some(self.widget)
    }
}
