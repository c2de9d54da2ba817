use crate::app::domain::document::{Document, DocumentId};
use crate::app::infrastructure::error::{AppError, Result};

/// The ordered tab collection. Always holds at least one document once the
/// first tab is added; `remove` refuses to take the last one away.
pub struct TabManager {
    documents: Vec<Document>,
    active_id: Option<DocumentId>,
    next_id: u64,
    undo_limit: usize,
}

impl TabManager {
    pub fn new(undo_limit: usize) -> Self {
        Self {
            documents: Vec::new(),
            active_id: None,
            next_id: 1,
            undo_limit,
        }
    }

    fn next_document_id(&mut self) -> DocumentId {
        let id = DocumentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append an empty "Tab {n}" and make it active. `n` is the tab count
    /// after the insert, so names may repeat once tabs have been closed.
    pub fn add_tab(&mut self) -> DocumentId {
        let id = self.next_document_id();
        let name = format!("Tab {}", self.documents.len() + 1);
        self.documents.push(Document::new(id, name, self.undo_limit));
        self.active_id = Some(id);
        tracing::debug!(?id, count = self.documents.len(), "tab added");
        id
    }

    pub fn active_doc(&self) -> Option<&Document> {
        let active_id = self.active_id?;
        self.doc_by_id(active_id)
    }

    pub fn active_doc_mut(&mut self) -> Option<&mut Document> {
        let active_id = self.active_id?;
        self.doc_by_id_mut(active_id)
    }

    pub fn set_active(&mut self, id: DocumentId) {
        if self.documents.iter().any(|d| d.id == id) {
            self.active_id = Some(id);
        }
    }

    /// Remove a document by id and activate its nearest neighbour.
    /// The last remaining tab is never removed.
    pub fn remove(&mut self, id: DocumentId) -> Result<()> {
        let Some(idx) = self.documents.iter().position(|d| d.id == id) else {
            return Ok(());
        };
        if self.documents.len() <= 1 {
            return Err(AppError::LastTab);
        }

        // Drop runs Document::cleanup and frees the FFI callback
        self.documents.remove(idx);

        if self.active_id == Some(id) {
            let new_idx = idx.min(self.documents.len() - 1);
            self.active_id = Some(self.documents[new_idx].id);
        }
        tracing::debug!(?id, count = self.documents.len(), "tab removed");
        Ok(())
    }

    /// Rename a tab. Empty names are ignored; returns whether the name
    /// changed.
    pub fn rename(&mut self, id: DocumentId, new_name: &str) -> bool {
        if new_name.is_empty() {
            return false;
        }
        match self.doc_by_id_mut(id) {
            Some(doc) => {
                doc.display_name = new_name.to_string();
                true
            }
            None => false,
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn count(&self) -> usize {
        self.documents.len()
    }

    pub fn active_id(&self) -> Option<DocumentId> {
        self.active_id
    }

    pub fn doc_by_id(&self, id: DocumentId) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn doc_by_id_mut(&mut self, id: DocumentId) -> Option<&mut Document> {
        self.documents.iter_mut().find(|d| d.id == id)
    }

    fn active_index(&self) -> Option<usize> {
        let active_id = self.active_id?;
        self.documents.iter().position(|d| d.id == active_id)
    }

    /// Tab after the active one, wrapping to the first.
    pub fn next_doc_id(&self) -> Option<DocumentId> {
        let idx = self.active_index()?;
        let next_idx = (idx + 1) % self.documents.len();
        Some(self.documents[next_idx].id)
    }

    /// Tab before the active one, wrapping to the last.
    pub fn prev_doc_id(&self) -> Option<DocumentId> {
        let idx = self.active_index()?;
        let prev_idx = if idx == 0 { self.documents.len() - 1 } else { idx - 1 };
        Some(self.documents[prev_idx].id)
    }
}
