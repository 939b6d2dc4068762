//! Local collections plus the optimistic-mutation protocol.
//!
//! Every mutating operation follows the same two-phase contract:
//!
//! 1. **Local apply**: mutate the collection immediately so a UI bound
//!    to it reflects the intended end state with zero latency, re-sorting
//!    when the mutation can change a completion flag.
//! 2. **Remote confirm**: issue the request. Success needs no further
//!    action; the optimistic state is already the intended end state.
//!    Failure restores authoritative state: deletes re-fetch the
//!    collection, toggles roll back to the pre-toggle snapshot.
//!
//! Creates are the exception: nothing appears locally until the server
//! has assigned an id, after which the collection is re-fetched.

use crate::{ApiError, Backend, Result};
use checklist::{TodoItem, TodoList, order};
use tracing::{debug, warn};

/// Mediates between local collections and a remote [`Backend`].
///
/// Methods run a mutation's local and remote phases to completion before
/// returning, so at most one request is ever in flight and responses
/// cannot arrive out of order.
#[derive(Debug)]
pub struct SyncController<B> {
    backend: B,
    lists: Vec<TodoList>,
    items: Vec<TodoItem>,
    open_list: Option<String>,
}

impl<B: Backend> SyncController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            lists: Vec::new(),
            items: Vec::new(),
            open_list: None,
        }
    }

    /// The last fetched lists, in server order.
    pub fn lists(&self) -> &[TodoList] {
        &self.lists
    }

    /// Items of the open list, in presentation order.
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// Id of the list whose items are currently held, if any.
    pub fn open_list_id(&self) -> Option<&str> {
        self.open_list.as_deref()
    }

    // ── Fetch ────────────────────────────────────────────────────────

    /// Replace the list collection with the server's. On failure the
    /// prior collection is left untouched and the error is returned.
    pub fn load_lists(&mut self) -> Result<()> {
        let fetched = self.backend.fetch_lists()?;
        debug!(count = fetched.len(), "replaced list collection");
        self.lists = fetched;
        Ok(())
    }

    /// Fetch and hold the items of `list_id`, stably sorted into
    /// presentation order. On failure nothing changes, including which
    /// list is considered open.
    pub fn open_list(&mut self, list_id: &str) -> Result<()> {
        let mut fetched = self.backend.fetch_items(list_id)?;
        order::sort_items(&mut fetched);
        debug!(%list_id, count = fetched.len(), "opened list");
        self.open_list = Some(list_id.to_string());
        self.items = fetched;
        Ok(())
    }

    // ── List mutations ───────────────────────────────────────────────

    /// Create a list. Not optimistic: the list appears only through the
    /// re-fetch that follows server confirmation.
    pub fn create_list(&mut self, title: &str) -> Result<TodoList> {
        require_nonempty(title, "title")?;
        let created = self.backend.create_list(title)?;
        self.refetch_lists("create list");
        Ok(created)
    }

    /// Remove a list optimistically. If the server rejects the deletion
    /// (e.g. not the owner), the collection is re-fetched to restore
    /// authoritative state and the error is returned.
    pub fn delete_list(&mut self, list_id: &str) -> Result<()> {
        self.lists.retain(|l| l.id != list_id);
        if let Err(err) = self.backend.delete_list(list_id) {
            warn!(%list_id, error = %err, "delete rejected, restoring lists");
            self.refetch_lists("failed delete");
            return Err(err);
        }
        Ok(())
    }

    /// Invite another user to a list. Not optimistic; no local state is
    /// involved at all.
    pub fn share_list(&self, list_id: &str, email: &str) -> Result<()> {
        require_nonempty(email, "email")?;
        self.backend.share_list(list_id, email)
    }

    // ── Item mutations ───────────────────────────────────────────────

    /// Create an item in the open list. Not optimistic: the item appears
    /// through the re-fetch that follows confirmation. On failure the
    /// collection is re-fetched as well, in case it has drifted.
    pub fn create_item(&mut self, title: &str) -> Result<TodoItem> {
        let list_id = self.open_list.clone().ok_or(ApiError::NoOpenList)?;
        require_nonempty(title, "title")?;
        match self.backend.create_item(&list_id, title) {
            Ok(created) => {
                self.refetch_items(&list_id, "create item");
                Ok(created)
            }
            Err(err) => {
                self.refetch_items(&list_id, "failed create");
                Err(err)
            }
        }
    }

    /// Flip an item's completion flag optimistically and re-sort.
    ///
    /// The flipped item joins the *end* of its destination partition;
    /// items already there retain their priority. If the server rejects
    /// the update, the collection is rolled back to its exact pre-toggle
    /// state. Returns the new flag value on success.
    pub fn toggle_item(&mut self, item_id: &str) -> Result<bool> {
        let pos = self
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| ApiError::UnknownItem(item_id.to_string()))?;

        let snapshot = self.items.clone();
        let mut item = self.items.remove(pos);
        let is_complete = !item.is_complete;
        item.is_complete = is_complete;
        // Pushing to the back before the stable sort lands the item at
        // the end of whichever partition it now belongs to.
        self.items.push(item);
        order::sort_items(&mut self.items);

        if let Err(err) = self.backend.set_complete(item_id, is_complete) {
            warn!(%item_id, error = %err, "toggle rejected, rolling back");
            self.items = snapshot;
            return Err(err);
        }
        Ok(is_complete)
    }

    /// Remove an item optimistically. A rejected deletion re-fetches the
    /// open list's items to restore authoritative state.
    pub fn delete_item(&mut self, item_id: &str) -> Result<()> {
        let list_id = self.open_list.clone().ok_or(ApiError::NoOpenList)?;
        if !self.items.iter().any(|i| i.id == item_id) {
            return Err(ApiError::UnknownItem(item_id.to_string()));
        }
        self.items.retain(|i| i.id != item_id);
        if let Err(err) = self.backend.delete_item(item_id) {
            warn!(%item_id, error = %err, "delete rejected, restoring items");
            self.refetch_items(&list_id, "failed delete");
            return Err(err);
        }
        Ok(())
    }

    // ── Best-effort re-fetches ───────────────────────────────────────

    // Reconciliation fetches after a mutation are swallowed with a log:
    // the triggering operation's outcome is what the caller cares about,
    // and a user can always refresh explicitly.

    fn refetch_lists(&mut self, reason: &str) {
        match self.backend.fetch_lists() {
            Ok(lists) => self.lists = lists,
            Err(err) => warn!(reason, error = %err, "list re-fetch failed, keeping local state"),
        }
    }

    fn refetch_items(&mut self, list_id: &str, reason: &str) {
        match self.backend.fetch_items(list_id) {
            Ok(mut items) => {
                order::sort_items(&mut items);
                self.items = items;
            }
            Err(err) => warn!(reason, error = %err, "item re-fetch failed, keeping local state"),
        }
    }
}

fn require_nonempty(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        Err(ApiError::Validation { field })
    } else {
        Ok(())
    }
}
