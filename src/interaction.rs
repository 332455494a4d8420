/// Hover tracking shared by both presentation modes.
///
/// Independent of dragging: the viewport may be mid-pan while a node is hovered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    hovered: Option<String>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn is_hovered(&self, id: &str) -> bool {
        self.hovered.as_deref() == Some(id)
    }

    pub fn on_node_enter(&mut self, id: &str) {
        self.hovered = Some(id.to_string());
    }

    /// Clears the hover only if `id` is the hovered node. A late leave from a
    /// node the pointer already moved away from must not clear the new hover.
    pub fn on_node_leave(&mut self, id: &str) {
        if self.is_hovered(id) {
            self.hovered = None;
        }
    }

    pub fn clear(&mut self) {
        self.hovered = None;
    }
}
