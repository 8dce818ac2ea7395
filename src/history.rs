//! The operation log and per-user redo stacks.
//!
//! The log is the authority: the committed drawing surface is always exactly
//! the result of replaying the log in order from an empty surface.  This
//! module only does the bookkeeping — removal, parking on redo stacks,
//! reinstatement; the painter triggers the replay after every mutation.
//! Undo/redo never "undraw" incrementally: applying a raster operation out
//! of order against a partially drawn surface is not supported, which is why
//! every history change is followed by a full replay.

use std::collections::HashMap;

use crate::op::Operation;

/// Append-only ordered history plus one redo stack per author.
#[derive(Default)]
pub struct OperationLog {
    entries: Vec<Operation>,
    redo_stacks: HashMap<String, Vec<Operation>>,
}

impl OperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.entries.iter()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|op| op.id() == Some(id))
    }

    /// How many undone operations `user` could currently redo.
    pub fn redo_depth(&self, user: &str) -> usize {
        self.redo_stacks.get(user).map_or(0, Vec::len)
    }

    /// Append a newly committed operation (local or inbound remote).
    ///
    /// New work by an author invalidates that author's redo future; every
    /// other user's redo stack is untouched.
    pub fn push(&mut self, op: Operation) {
        if let Some(user) = op.user_id()
            && let Some(stack) = self.redo_stacks.get_mut(user)
        {
            stack.clear();
        }
        self.entries.push(op);
    }

    /// Remove the most recently appended operation authored by `user` — the
    /// scan is by authorship, not simply the log tail — and park it on that
    /// user's redo stack.  `None` when the user has nothing in the log.
    pub fn undo_local(&mut self, user: &str) -> Option<Operation> {
        let idx = self.entries.iter().rposition(|op| op.user_id() == Some(user))?;
        let op = self.entries.remove(idx);
        self.redo_stacks
            .entry(user.to_string())
            .or_default()
            .push(op.clone());
        Some(op)
    }

    /// Pop `user`'s redo stack and re-append the operation to the log.
    /// Bypasses [`OperationLog::push`]: a redo must not clear the very stack
    /// it pops from.
    pub fn redo_local(&mut self, user: &str) -> Option<Operation> {
        let op = self.redo_stacks.get_mut(user)?.pop()?;
        self.entries.push(op.clone());
        Some(op)
    }

    /// Remote undo: remove the named operation regardless of author and park
    /// it on *that operation's author's* redo stack.  Unknown ids: `None`.
    pub fn remove(&mut self, id: &str) -> Option<Operation> {
        let idx = self.entries.iter().position(|op| op.id() == Some(id))?;
        let op = self.entries.remove(idx);
        if let Some(user) = op.user_id() {
            self.redo_stacks
                .entry(user.to_string())
                .or_default()
                .push(op.clone());
        }
        Some(op)
    }

    /// Remote redo: re-append the given operation and drop any matching id
    /// from its author's redo stack.
    pub fn reinstate(&mut self, op: Operation) {
        if let (Some(user), Some(id)) = (op.user_id(), op.id())
            && let Some(stack) = self.redo_stacks.get_mut(user)
        {
            stack.retain(|parked| parked.id() != Some(id));
        }
        self.entries.push(op);
    }

    /// Empty the log and every user's redo stack.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.redo_stacks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(id: &str, user: &str) -> Operation {
        Operation::Fill {
            id: id.into(),
            user_id: user.into(),
            point: crate::geometry::Point::new(0.5, 0.5),
            color: "#1E88E5".into(),
        }
    }

    fn ids(log: &OperationLog) -> Vec<&str> {
        log.iter().filter_map(|op| op.id()).collect()
    }

    #[test]
    fn undo_scans_authorship_not_the_tail() {
        let mut log = OperationLog::new();
        log.push(fill("a1", "ada"));
        log.push(fill("b1", "bob"));

        // Ada's undo removes a1 even though b1 is the tail.
        let undone = log.undo_local("ada").unwrap();
        assert_eq!(undone.id(), Some("a1"));
        assert_eq!(ids(&log), vec!["b1"]);
    }

    #[test]
    fn undo_then_redo_restores_the_log() {
        let mut log = OperationLog::new();
        log.push(fill("a1", "ada"));
        log.push(fill("a2", "ada"));

        log.undo_local("ada").unwrap();
        let redone = log.redo_local("ada").unwrap();
        assert_eq!(redone.id(), Some("a2"));
        assert_eq!(ids(&log), vec!["a1", "a2"]);
        assert_eq!(log.redo_depth("ada"), 0);
    }

    #[test]
    fn undo_with_no_authored_operations_is_none() {
        let mut log = OperationLog::new();
        log.push(fill("b1", "bob"));
        assert!(log.undo_local("ada").is_none());
        assert!(log.redo_local("ada").is_none());
        assert_eq!(ids(&log), vec!["b1"]);
    }

    #[test]
    fn new_work_clears_only_the_authors_redo_stack() {
        let mut log = OperationLog::new();
        log.push(fill("a1", "ada"));
        log.push(fill("b1", "bob"));
        log.undo_local("ada").unwrap();
        log.undo_local("bob").unwrap();
        assert_eq!(log.redo_depth("ada"), 1);
        assert_eq!(log.redo_depth("bob"), 1);

        log.push(fill("a2", "ada"));
        assert_eq!(log.redo_depth("ada"), 0);
        assert_eq!(log.redo_depth("bob"), 1);
        assert!(log.redo_local("bob").is_some());
    }

    #[test]
    fn remote_undo_parks_on_the_authors_stack() {
        let mut log = OperationLog::new();
        log.push(fill("a1", "ada"));
        log.push(fill("b1", "bob"));

        // A peer undoes Bob's operation; Bob can later redo it locally.
        let removed = log.remove("b1").unwrap();
        assert_eq!(removed.user_id(), Some("bob"));
        assert_eq!(log.redo_depth("bob"), 1);
        assert_eq!(log.redo_local("bob").unwrap().id(), Some("b1"));
    }

    #[test]
    fn remove_unknown_id_is_a_noop() {
        let mut log = OperationLog::new();
        log.push(fill("a1", "ada"));
        assert!(log.remove("missing").is_none());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn reinstate_purges_the_parked_copy() {
        let mut log = OperationLog::new();
        let op = fill("a1", "ada");
        log.push(op.clone());
        log.undo_local("ada").unwrap();
        assert_eq!(log.redo_depth("ada"), 1);

        // The author's redo arrives from the transport instead of locally.
        log.reinstate(op);
        assert_eq!(ids(&log), vec!["a1"]);
        assert_eq!(log.redo_depth("ada"), 0);
    }

    #[test]
    fn clear_empties_everything() {
        let mut log = OperationLog::new();
        log.push(fill("a1", "ada"));
        log.push(fill("b1", "bob"));
        log.undo_local("ada").unwrap();
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.redo_depth("ada"), 0);
        assert_eq!(log.redo_depth("bob"), 0);
    }
}
