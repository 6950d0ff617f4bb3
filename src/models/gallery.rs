use super::generation::ResultItem;

/// Insertion-ordered collection of generated images.
///
/// Items are appended as they arrive from the service; the display order is
/// always ascending by index, whatever order the transport delivered them in.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    items: Vec<ResultItem>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    /// Items in arrival order.
    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    /// Items sorted ascending by index. The sort is stable, so items sharing
    /// an index (e.g. the missing-index sentinel) keep arrival order.
    pub fn ordered(&self) -> Vec<&ResultItem> {
        let mut ordered: Vec<&ResultItem> = self.items.iter().collect();
        ordered.sort_by_key(|item| item.index);
        ordered
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
