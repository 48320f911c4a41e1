//! Local writes layered over read-only remote data
//!
//! The remote API accepts no writes, so creates, updates and deletes are
//! kept here and applied over every freshly fetched collection. Each id has
//! at most one entry: later writes fold into earlier ones.

use crate::domain::entities::Identified;

/// One local write
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayWrite<T> {
    Create(T),
    Update(T),
    Delete(u64),
}

/// Folded local writes, one entry per id
#[derive(Debug, Clone)]
pub struct LocalOverlay<T> {
    /// Records created locally, oldest first, at their latest version
    created: Vec<T>,
    /// Latest local version of remote records
    updated: Vec<T>,
    /// Remote ids deleted locally
    deleted: Vec<u64>,
}

impl<T> Default for LocalOverlay<T> {
    fn default() -> Self {
        Self {
            created: Vec::new(),
            updated: Vec::new(),
            deleted: Vec::new(),
        }
    }
}

impl<T: Identified + Clone> LocalOverlay<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `write` into the overlay
    pub fn record(&mut self, write: OverlayWrite<T>) {
        match write {
            OverlayWrite::Create(record) => self.created.push(record),
            OverlayWrite::Update(record) => {
                let id = record.id();
                if let Some(slot) = self.created.iter_mut().find(|r| r.id() == id) {
                    *slot = record;
                } else if let Some(slot) = self.updated.iter_mut().find(|r| r.id() == id) {
                    *slot = record;
                } else {
                    self.updated.push(record);
                }
            }
            OverlayWrite::Delete(id) => {
                let before = self.created.len();
                self.created.retain(|r| r.id() != id);
                if self.created.len() == before {
                    self.updated.retain(|r| r.id() != id);
                    if !self.deleted.contains(&id) {
                        self.deleted.push(id);
                    }
                }
            }
        }
    }

    /// Number of ids carrying a local write
    pub fn len(&self) -> usize {
        self.created.len() + self.updated.len() + self.deleted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.created.clear();
        self.updated.clear();
        self.deleted.clear();
    }

    /// Apply the overlay to `base`: deleted records go, updated records
    /// take their local version, created records go to the front (newest
    /// first). `keep` filters every record at its latest version.
    pub fn replay<F>(&self, mut base: Vec<T>, keep: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        base.retain(|r| !self.deleted.contains(&r.id()));
        for record in base.iter_mut() {
            if let Some(local) = self.updated.iter().find(|u| u.id() == record.id()) {
                *record = local.clone();
            }
        }

        let mut visible: Vec<T> = self.created.iter().rev().cloned().collect();
        visible.extend(base);
        visible.retain(|r| keep(r));
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u64,
        label: &'static str,
    }

    impl Identified for Row {
        fn id(&self) -> u64 {
            self.id
        }
    }

    fn row(id: u64, label: &'static str) -> Row {
        Row { id, label }
    }

    #[test]
    fn test_empty_overlay_returns_base() {
        let overlay: LocalOverlay<Row> = LocalOverlay::new();
        let base = vec![row(1, "a"), row(2, "b")];
        assert_eq!(overlay.replay(base.clone(), |_| true), base);
    }

    #[test]
    fn test_replay_applies_every_kind_of_write() {
        let mut overlay = LocalOverlay::new();
        overlay.record(OverlayWrite::Create(row(1001, "first")));
        overlay.record(OverlayWrite::Create(row(1002, "second")));
        overlay.record(OverlayWrite::Update(row(2, "edited")));
        overlay.record(OverlayWrite::Delete(1));

        let visible = overlay.replay(vec![row(1, "a"), row(2, "b")], |_| true);
        assert_eq!(
            visible,
            vec![row(1002, "second"), row(1001, "first"), row(2, "edited")]
        );
    }

    #[test]
    fn test_one_entry_per_id() {
        let mut overlay = LocalOverlay::new();
        overlay.record(OverlayWrite::Create(row(1001, "new")));
        overlay.record(OverlayWrite::Update(row(1001, "renamed")));
        overlay.record(OverlayWrite::Update(row(2, "x")));
        overlay.record(OverlayWrite::Update(row(2, "y")));
        assert_eq!(overlay.len(), 2);

        overlay.record(OverlayWrite::Delete(1001));
        overlay.record(OverlayWrite::Delete(2));
        overlay.record(OverlayWrite::Delete(2));
        assert_eq!(overlay.len(), 1);
        assert!(overlay.replay(vec![row(2, "b")], |_| true).is_empty());
    }

    #[test]
    fn test_keep_sees_latest_version() {
        let mut overlay = LocalOverlay::new();
        overlay.record(OverlayWrite::Create(row(1001, "other")));
        overlay.record(OverlayWrite::Update(row(1001, "wanted")));
        overlay.record(OverlayWrite::Create(row(1002, "wanted")));
        overlay.record(OverlayWrite::Update(row(1002, "other")));
        overlay.record(OverlayWrite::Update(row(1, "other")));

        let visible = overlay.replay(vec![row(1, "wanted")], |r| r.label == "wanted");
        assert_eq!(visible, vec![row(1001, "wanted")]);
    }

    #[test]
    fn test_updates_to_absent_records_are_skipped() {
        let mut overlay = LocalOverlay::new();
        overlay.record(OverlayWrite::Update(row(7, "absent")));

        let visible = overlay.replay(vec![row(1, "a")], |_| true);
        assert_eq!(visible, vec![row(1, "a")]);
    }
}
