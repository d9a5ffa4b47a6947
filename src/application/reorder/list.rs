use crate::domain::ordering::{ItemId, ordinal_label};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub id: ItemId,
    pub label: Option<String>,
}

/// Children of one list container in visual top-to-bottom order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedList {
    container_id: String,
    entries: Vec<ListEntry>,
}

impl OrderedList {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            entries: Vec::new(),
        }
    }

    /// A list without ordinal labels.
    pub fn from_ids<I, T>(container_id: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemId>,
    {
        let mut list = Self::new(container_id);
        for id in ids {
            list.push(id, None);
        }
        list
    }

    /// A list whose entries start out labelled with their 1-based position.
    pub fn labelled<I, T>(container_id: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemId>,
    {
        let mut list = Self::from_ids(container_id, ids);
        list.relabel();
        list
    }

    pub fn push(&mut self, id: impl Into<ItemId>, label: Option<String>) {
        self.entries.push(ListEntry {
            id: id.into(),
            label,
        });
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.entries.iter().map(|entry| &entry.id)
    }

    pub fn labels(&self) -> impl Iterator<Item = Option<&str>> {
        self.entries.iter().map(|entry| entry.label.as_deref())
    }

    pub fn label_of(&self, id: &ItemId) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| &entry.id == id)
            .and_then(|entry| entry.label.as_deref())
    }

    /// Move the child at `from` so that it ends up at index `to`, the way a
    /// drag gesture does. Out-of-range indices leave the list untouched.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from >= self.entries.len() || to >= self.entries.len() {
            return false;
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        true
    }

    pub(super) fn relabel(&mut self) {
        for (index, entry) in self.entries.iter_mut().enumerate() {
            let position = i32::try_from(index).unwrap_or(i32::MAX - 1);
            entry.label = Some(ordinal_label(position));
        }
    }
}
