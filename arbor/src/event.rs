//! Notifications handed to the view layer.
//!
//! The view reports what happened to a row as an [`EventName`] plus the raw
//! input that triggered it. [`TreeStateEngine::format_event`] turns that into
//! a [`TreeEvent`] carrying exactly the state each kind of listener needs.

use crate::engine::TreeStateEngine;
use crate::node::NodeId;

/// Symbolic name of a row event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventName {
    DragStart,
    DragEnter,
    DragOver,
    DragLeave,
    Drop,
    DragEnd,
    Click,
    DblClick,
    ContextMenu,
    TouchStart,
    Check,
    Search,
    Expand,
    /// Any name the engine has no payload for.
    Other(String),
}

impl EventName {
    /// The DOM-style name of this event.
    pub fn as_str(&self) -> &str {
        match self {
            EventName::DragStart => "dragstart",
            EventName::DragEnter => "dragenter",
            EventName::DragOver => "dragover",
            EventName::DragLeave => "dragleave",
            EventName::Drop => "drop",
            EventName::DragEnd => "dragend",
            EventName::Click => "click",
            EventName::DblClick => "dblclick",
            EventName::ContextMenu => "contextmenu",
            EventName::TouchStart => "touchstart",
            EventName::Check => "check",
            EventName::Search => "search",
            EventName::Expand => "expand",
            EventName::Other(name) => name,
        }
    }

    pub fn is_drag(&self) -> bool {
        matches!(
            self,
            EventName::DragStart
                | EventName::DragEnter
                | EventName::DragOver
                | EventName::DragLeave
                | EventName::Drop
                | EventName::DragEnd
        )
    }

    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            EventName::Click | EventName::DblClick | EventName::ContextMenu | EventName::TouchStart
        )
    }
}

impl From<&str> for EventName {
    fn from(name: &str) -> Self {
        match name {
            "dragstart" => EventName::DragStart,
            "dragenter" => EventName::DragEnter,
            "dragover" => EventName::DragOver,
            "dragleave" => EventName::DragLeave,
            "drop" => EventName::Drop,
            "dragend" => EventName::DragEnd,
            "click" => EventName::Click,
            "dblclick" => EventName::DblClick,
            "contextmenu" => EventName::ContextMenu,
            "touchstart" => EventName::TouchStart,
            "check" => EventName::Check,
            "search" => EventName::Search,
            "expand" => EventName::Expand,
            other => EventName::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Raw input that triggered a row event, echoed back to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RawEvent {
    /// Mouse or drag input at a view position.
    Pointer {
        x: f32,
        y: f32,
        button: MouseButton,
        modifiers: Modifiers,
    },
    /// Touch input at a view position.
    Touch { x: f32, y: f32 },
    /// Programmatic trigger with no input behind it.
    #[default]
    None,
}

/// A list of nodes together with their keys, in pre-order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeSet {
    pub nodes: Vec<NodeId>,
    pub keys: Vec<String>,
}

/// Structured notification for the view layer.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeEvent {
    /// A drag-family event, with the node being dragged.
    Drag {
        name: EventName,
        node: NodeId,
        event: RawEvent,
        drag_node: Option<NodeId>,
    },
    /// A click-like event, with the current selection.
    Pointer {
        name: EventName,
        node: NodeId,
        event: RawEvent,
        selection: NodeSet,
    },
    /// A checkbox toggle, with the checked nodes.
    Check {
        node: NodeId,
        event: RawEvent,
        checked: NodeSet,
    },
    /// A search run, with the matched nodes.
    Search {
        node: NodeId,
        event: RawEvent,
        matched: NodeSet,
    },
    /// An expand/collapse, with the expanded nodes.
    Expand { node: NodeId, expanded: NodeSet },
    /// Base record for names without a payload.
    Other {
        name: EventName,
        node: NodeId,
        event: RawEvent,
    },
}

impl TreeEvent {
    pub fn name(&self) -> EventName {
        match self {
            TreeEvent::Drag { name, .. }
            | TreeEvent::Pointer { name, .. }
            | TreeEvent::Other { name, .. } => name.clone(),
            TreeEvent::Check { .. } => EventName::Check,
            TreeEvent::Search { .. } => EventName::Search,
            TreeEvent::Expand { .. } => EventName::Expand,
        }
    }

    /// The row the event happened on.
    pub fn node(&self) -> NodeId {
        match self {
            TreeEvent::Drag { node, .. }
            | TreeEvent::Pointer { node, .. }
            | TreeEvent::Check { node, .. }
            | TreeEvent::Search { node, .. }
            | TreeEvent::Expand { node, .. }
            | TreeEvent::Other { node, .. } => *node,
        }
    }

    /// The echoed raw input, if this kind carries one.
    pub fn event(&self) -> Option<&RawEvent> {
        match self {
            TreeEvent::Drag { event, .. }
            | TreeEvent::Pointer { event, .. }
            | TreeEvent::Check { event, .. }
            | TreeEvent::Search { event, .. }
            | TreeEvent::Other { event, .. } => Some(event),
            TreeEvent::Expand { .. } => None,
        }
    }

    fn set(&self) -> Option<&NodeSet> {
        match self {
            TreeEvent::Pointer { selection: set, .. }
            | TreeEvent::Check { checked: set, .. }
            | TreeEvent::Search { matched: set, .. }
            | TreeEvent::Expand { expanded: set, .. } => Some(set),
            TreeEvent::Drag { .. } | TreeEvent::Other { .. } => None,
        }
    }

    /// Nodes carried by the event, empty for drag and base records.
    pub fn nodes(&self) -> &[NodeId] {
        self.set().map(|s| s.nodes.as_slice()).unwrap_or(&[])
    }

    /// Keys carried by the event, empty for drag and base records.
    pub fn keys(&self) -> &[String] {
        self.set().map(|s| s.keys.as_slice()).unwrap_or(&[])
    }

    /// The dragged node, for drag-family events.
    pub fn drag_node(&self) -> Option<NodeId> {
        match self {
            TreeEvent::Drag { drag_node, .. } => *drag_node,
            _ => None,
        }
    }
}

impl TreeStateEngine {
    /// Build the notification for `name` happening on `node`.
    pub fn format_event(&self, name: EventName, node: NodeId, event: RawEvent) -> TreeEvent {
        if name.is_drag() {
            return TreeEvent::Drag {
                name,
                node,
                event,
                drag_node: self.selected_node(),
            };
        }
        if name.is_pointer() {
            return TreeEvent::Pointer {
                name,
                node,
                event,
                selection: self.node_set(self.selected_nodes()),
            };
        }
        match name {
            EventName::Check => TreeEvent::Check {
                node,
                event,
                checked: self.node_set(self.checked_nodes()),
            },
            EventName::Search => TreeEvent::Search {
                node,
                event,
                matched: self.node_set(self.matched_nodes()),
            },
            EventName::Expand => TreeEvent::Expand {
                node,
                expanded: self.node_set(self.expanded_nodes()),
            },
            name => TreeEvent::Other { name, node, event },
        }
    }

    fn node_set(&self, nodes: Vec<NodeId>) -> NodeSet {
        let keys = self.keys_of(&nodes);
        NodeSet { nodes, keys }
    }
}
