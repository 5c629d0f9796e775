//! The shared host surface every toast node is attached to.
//!
//! There is exactly one host per manager. Its position class reflects the
//! most recently shown toast, so changing position moves the whole stack.

use crate::node::{Action, Element};
use crate::toast::{Position, Toast};
use serde::Serialize;
use tracing::warn;

/// Class carried by the host container
pub const CONTAINER_CLASS: &str = "toastr-container";
/// Class carried by every toast node
pub const TOAST_CLASS: &str = "toastr";
/// Marker applied to a toast node once it starts exiting
pub const EXIT_CLASS: &str = "toastr-exit";
/// Attribute holding the toast id
pub const ID_ATTRIBUTE: &str = "data-toast-id";

pub const CONTENT_CLASS: &str = "toastr-content";
pub const HEADING_CLASS: &str = "toastr-heading";
pub const ICON_CLASS: &str = "toastr-icon";
pub const TITLE_CLASS: &str = "toastr-title";
pub const DESCRIPTION_CLASS: &str = "toastr-description";
pub const CLOSE_CLASS: &str = "toastr-close";
pub const PROGRESS_CLASS: &str = "toastr-progress";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Host {
    root: Element,
}

impl Host {
    pub fn new() -> Self {
        Self {
            root: Element::new("div").class(CONTAINER_CLASS),
        }
    }

    /// The container element and everything attached to it
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Current anchor, read back from the container's classes
    pub fn position(&self) -> Option<Position> {
        self.root.classes.iter().find_map(|c| Position::from_class(c))
    }

    /// Replace whichever position class is set with `position`
    pub fn set_position(&mut self, position: Position) {
        for p in Position::ALL {
            self.root.remove_class(p.as_class());
        }
        self.root.add_class(position.as_class());
    }

    pub fn attach(&mut self, node: Element) {
        self.root.children.push(node.into());
    }

    /// Toast nodes in attachment order, exiting ones included
    pub fn toast_nodes(&self) -> impl Iterator<Item = &Element> {
        self.root
            .child_elements()
            .filter(|e| e.has_class(TOAST_CLASS))
    }

    pub fn find_toast(&self, id: &str) -> Option<&Element> {
        self.toast_nodes()
            .find(|e| e.attribute(ID_ATTRIBUTE) == Some(id))
    }

    pub fn find_toast_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.root
            .find_mut(&|e| e.has_class(TOAST_CLASS) && e.attribute(ID_ATTRIBUTE) == Some(id))
    }

    /// Detach the toast node with `id`; returns whether one was attached
    pub fn detach(&mut self, id: &str) -> bool {
        self.root
            .remove_child(&|e| e.has_class(TOAST_CLASS) && e.attribute(ID_ATTRIBUTE) == Some(id))
            .is_some()
    }

    pub fn to_markup(&self) -> String {
        self.root.to_markup()
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

/// Classes the toast markup itself uses (`toastr`, `toastr-*`)
pub fn is_reserved_class(class: &str) -> bool {
    class == TOAST_CLASS || class.starts_with("toastr-")
}

/// Build the presentation node for `toast`
pub fn build_toast_node(toast: &Toast) -> Element {
    let id = toast.id.to_string();

    let mut node = Element::new("div")
        .class(TOAST_CLASS)
        .class(toast.kind.class_name())
        .attr(ID_ATTRIBUTE, id);
    if let Some(class_name) = &toast.options.class_name {
        for class in class_name.split_whitespace() {
            if is_reserved_class(class) {
                warn!("Ignoring reserved class {:?} on toast {}", class, toast.id);
                continue;
            }
            node.add_class(class);
        }
    }

    let icon = toast.icon.as_ref().map(|icon| {
        Element::new("span")
            .class(ICON_CLASS)
            .attr("data-icon", icon.clone())
            .text(icon.clone())
    });
    let heading = Element::new("div")
        .class(HEADING_CLASS)
        .child_opt(icon)
        .child(Element::new("span").class(TITLE_CLASS).text(toast.title.clone()));
    let description = toast
        .description
        .as_ref()
        .map(|d| Element::new("div").class(DESCRIPTION_CLASS).text(d.clone()));
    let content = Element::new("div")
        .class(CONTENT_CLASS)
        .child(heading)
        .child_opt(description);

    let close = toast.options.close_button.then(|| {
        Element::new("button")
            .class(CLOSE_CLASS)
            .text("\u{00D7}") // ×
            .on_activate(Action::Remove(toast.id))
    });
    let progress = toast
        .options
        .progress_bar
        .then(|| Element::new("div").class(PROGRESS_CLASS));

    node.child(content).child_opt(close).child_opt(progress)
}
