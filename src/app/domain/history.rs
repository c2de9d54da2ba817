//! Per-buffer linear undo/redo.
//!
//! Each record stores the byte position, the text that was removed and the
//! text that replaced it, so one type covers typing, deleting, pasting and
//! whole-buffer replacement. Undo hands back the inverse record for the
//! caller to apply to the buffer; redo hands back the original.

use std::collections::VecDeque;

pub const DEFAULT_UNDO_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub pos: usize,
    pub deleted: String,
    pub inserted: String,
}

impl Edit {
    pub fn new(pos: usize, deleted: impl Into<String>, inserted: impl Into<String>) -> Self {
        Self {
            pos,
            deleted: deleted.into(),
            inserted: inserted.into(),
        }
    }

    pub fn inverse(&self) -> Self {
        Self {
            pos: self.pos,
            deleted: self.inserted.clone(),
            inserted: self.deleted.clone(),
        }
    }

    fn is_insertion(&self) -> bool {
        self.deleted.is_empty() && !self.inserted.is_empty()
    }

    fn is_deletion(&self) -> bool {
        self.inserted.is_empty() && !self.deleted.is_empty()
    }

    /// Byte position just past the inserted text, where the cursor goes
    /// after this edit is applied.
    pub fn end(&self) -> usize {
        self.pos + self.inserted.len()
    }

    /// Fold `next` into `self` if it continues the same run of typing or
    /// deleting. Newlines always end a run.
    fn try_coalesce(&mut self, next: &Edit) -> bool {
        if self.inserted.ends_with('\n') || next.inserted.contains('\n') || next.deleted.contains('\n') {
            return false;
        }
        if self.is_insertion() && next.is_insertion() && next.pos == self.end() {
            self.inserted.push_str(&next.inserted);
            return true;
        }
        if self.is_deletion() && next.is_deletion() {
            if next.pos + next.deleted.len() == self.pos {
                // backspace
                self.deleted.insert_str(0, &next.deleted);
                self.pos = next.pos;
                return true;
            }
            if next.pos == self.pos {
                // forward delete
                self.deleted.push_str(&next.deleted);
                return true;
            }
        }
        false
    }

    /// Apply to a plain string. Returns false if the record does not fit.
    pub fn apply_to(&self, text: &mut String) -> bool {
        let end = self.pos + self.deleted.len();
        if end > text.len() || text.get(self.pos..end) != Some(self.deleted.as_str()) {
            return false;
        }
        text.replace_range(self.pos..end, &self.inserted);
        true
    }
}

#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: VecDeque<Edit>,
    redo_stack: Vec<Edit>,
    limit: usize,
    sealed: bool,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_LIMIT)
    }
}

impl EditHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
            sealed: false,
        }
    }

    pub fn record(&mut self, edit: Edit) {
        if edit.deleted.is_empty() && edit.inserted.is_empty() {
            return;
        }
        self.redo_stack.clear();

        if !self.sealed {
            if let Some(last) = self.undo_stack.back_mut() {
                if last.try_coalesce(&edit) {
                    return;
                }
            }
        }
        self.sealed = false;

        self.undo_stack.push_back(edit);
        while self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
        }
    }

    /// Close the current run so the next edit starts a new undo step.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// The record to apply to the buffer to undo the last step.
    pub fn undo(&mut self) -> Option<Edit> {
        let edit = self.undo_stack.pop_back()?;
        let inverse = edit.inverse();
        self.redo_stack.push(edit);
        self.sealed = true;
        Some(inverse)
    }

    /// The record to apply to the buffer to redo the last undone step.
    pub fn redo(&mut self) -> Option<Edit> {
        let edit = self.redo_stack.pop()?;
        self.undo_stack.push_back(edit.clone());
        self.sealed = true;
        Some(edit)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }
}
