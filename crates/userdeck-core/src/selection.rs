// ── Selection Controller ──
//
// At most one record is open in the detail view. `select` always
// overwrites, `clear` always closes.

use std::sync::Arc;

use crate::model::Record;

#[derive(Debug, Default, Clone)]
pub struct SelectionController {
    current: Option<Arc<Record>>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the detail view on `record`, replacing any previous selection.
    pub fn select(&mut self, record: Arc<Record>) {
        self.current = Some(record);
    }

    /// Close the detail view. Returns whether anything was open.
    pub fn clear(&mut self) -> bool {
        self.current.take().is_some()
    }

    pub fn current(&self) -> Option<&Arc<Record>> {
        self.current.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_then_clear_closes() {
        let mut sel = SelectionController::new();
        assert!(!sel.is_open());

        sel.select(Arc::new(Record::new(1, "Ana")));
        assert!(sel.is_open());

        assert!(sel.clear());
        assert!(sel.current().is_none());
    }

    #[test]
    fn select_replaces_previous() {
        let mut sel = SelectionController::new();
        sel.select(Arc::new(Record::new(1, "Ana")));
        sel.select(Arc::new(Record::new(2, "Beto")));
        assert_eq!(sel.current().map(|r| r.name.as_str()), Some("Beto"));
    }

    #[test]
    fn clear_when_closed_is_a_no_op() {
        let mut sel = SelectionController::new();
        assert!(!sel.clear());
        assert!(!sel.is_open());
    }
}
