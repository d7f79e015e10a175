//! The store engine: holds the live [`AppData`] aggregate and exposes every
//! mutation the application performs.
//!
//! Mutations are serialized on the caller's thread; each one updates the
//! in-memory aggregate, triggers a save through the persistence adapter and
//! surfaces its outcome through the notification gateway. A failed save is
//! reported but never rolls the in-memory change back, so a user action is
//! never lost within the running session.

use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{debug, info, warn};

use crate::{
    helper::{normalize_tags, IdGenerator},
    AppData, ConfirmationGate, ContentItem, DataStore, Group, NewItem, Notification, Notifier,
    StatLog, TargetType, DEFAULT_GROUP_ICON, GENERAL_GROUP_ID,
};

/// Owns the single authoritative copy of the application state.
pub struct ContentStore {
    /// Live application state
    data: AppData,

    /// The group currently selected for browsing, if any
    active_group_id: Option<String>,

    /// Persistence adapter; written after every mutation
    store: DataStore,

    /// Outcome notification sink
    notifier: Box<dyn Notifier>,

    /// Gate in front of destructive mutations
    gate: Box<dyn ConfirmationGate>,

    /// Allocator for group/item/stat ids
    ids: IdGenerator,
}

impl ContentStore {
    /// Loads persisted state and selects the first group, mirroring the
    /// initial selection a fresh session starts with.
    pub fn open(
        store: DataStore,
        notifier: Box<dyn Notifier>,
        gate: Box<dyn ConfirmationGate>,
    ) -> Self {
        let data = store.load();
        let active_group_id = data.groups.first().map(|g| g.id.clone());
        Self {
            data,
            active_group_id,
            store,
            notifier,
            gate,
            ids: IdGenerator::new(),
        }
    }

    /// Read-only view of the live aggregate.
    pub fn data(&self) -> &AppData {
        &self.data
    }

    pub fn active_group_id(&self) -> Option<&str> {
        self.active_group_id.as_deref()
    }

    /// Changes the browsing selection. A non-null selection counts as a
    /// group access and is logged as such.
    pub fn set_active_group(&mut self, id: Option<String>) {
        if let Some(ref id) = id {
            self.log_access(id, TargetType::Group);
        }
        self.active_group_id = id;
    }

    /// Creates a new group and makes it active. A name that is empty after
    /// trimming is a silent no-op.
    pub fn add_group(&mut self, name: &str, icon: Option<&str>) -> Option<Group> {
        let name = name.trim();
        if name.is_empty() {
            debug!("ignoring add_group with empty name");
            return None;
        }

        let group = Group {
            id: self.ids.next_id(),
            name: name.to_string(),
            icon: icon.unwrap_or(DEFAULT_GROUP_ICON).to_string(),
            created_at: Utc::now(),
            access_count: 0,
        };
        info!("creating group {} ({})", group.name, group.id);
        self.data.groups.push(group.clone());

        // Activating the new group logs the access and persists everything
        // pushed above in the same save.
        self.set_active_group(Some(group.id.clone()));

        self.notifier.notify(&Notification::normal(
            "Group Created",
            format!("Group \"{}\" has been created.", group.name),
        ));
        Some(group)
    }

    /// Renames and optionally re-icons a group in place. Unknown ids and
    /// empty names are silent no-ops. Protection of the General group is a
    /// caller contract; the engine tolerates being called on it.
    pub fn update_group(&mut self, id: &str, name: &str, icon: Option<&str>) {
        let name = name.trim();
        if name.is_empty() {
            debug!("ignoring update_group with empty name");
            return;
        }

        let Some(group) = self.data.groups.iter_mut().find(|g| g.id == id) else {
            debug!("update_group: no group with id {}", id);
            return;
        };

        group.name = name.to_string();
        if let Some(icon) = icon {
            group.icon = icon.to_string();
        }
        let name = group.name.clone();

        self.persist();
        self.notifier.notify(&Notification::normal(
            "Group Updated",
            format!("Group has been renamed to \"{}\".", name),
        ));
    }

    /// Deletes a group and every item it contains, after confirmation.
    ///
    /// The General group is never deleted. If the deleted group was active,
    /// the selection falls back to the first remaining group.
    pub fn delete_group(&mut self, id: &str) {
        if id == GENERAL_GROUP_ID {
            warn!("refusing to delete the General group");
            self.notifier.notify(&Notification::destructive(
                "Group Protected",
                "The General group cannot be deleted.",
            ));
            return;
        }

        let Some(group) = self.data.groups.iter().find(|g| g.id == id) else {
            debug!("delete_group: no group with id {}", id);
            return;
        };
        let name = group.name.clone();

        let item_count = self.data.items.iter().filter(|i| i.group_id == id).count();
        let prompt = format!(
            "You are about to delete group \"{}\" and its {} item{}.",
            name,
            item_count,
            if item_count == 1 { "" } else { "s" }
        );
        if !self.gate.confirm(&prompt) {
            info!("group deletion cancelled: {}", id);
            return;
        }

        self.data.groups.retain(|g| g.id != id);
        self.data.items.retain(|i| i.group_id != id);
        if self.active_group_id.as_deref() == Some(id) {
            self.active_group_id = self.data.groups.first().map(|g| g.id.clone());
        }

        info!("deleted group {} and {} items", id, item_count);
        self.persist();
        self.notifier.notify(&Notification::normal(
            "Group Deleted",
            "The group and its contents have been deleted.",
        ));
    }

    /// Creates a new content item. An empty title or an unknown target
    /// group is a silent no-op.
    pub fn add_item(&mut self, new_item: NewItem) -> Option<ContentItem> {
        let title = new_item.title.trim();
        if title.is_empty() {
            debug!("ignoring add_item with empty title");
            return None;
        }
        if !self.data.groups.iter().any(|g| g.id == new_item.group_id) {
            debug!("add_item: no group with id {}", new_item.group_id);
            return None;
        }

        let item = ContentItem {
            id: self.ids.next_id(),
            group_id: new_item.group_id,
            title: title.to_string(),
            tags: normalize_tags(&new_item.tags),
            created_at: Utc::now(),
            access_count: 0,
            last_accessed: None,
            icon: new_item.icon,
            aspect: new_item.aspect,
            payload: new_item.payload,
        };
        info!("adding {:?} item {}", item.item_type(), item.id);
        self.data.items.push(item.clone());

        self.persist();
        self.notifier.notify(&Notification::normal(
            "Item Added",
            format!("\"{}\" has been added.", item.title),
        ));
        Some(item)
    }

    /// Replaces an existing item wholesale by id. The caller supplies the
    /// complete updated record; there are no partial-merge semantics.
    pub fn update_item(&mut self, updated: ContentItem) {
        let Some(slot) = self.data.items.iter_mut().find(|i| i.id == updated.id) else {
            debug!("update_item: no item with id {}", updated.id);
            return;
        };

        let title = updated.title.clone();
        *slot = updated;

        self.persist();
        self.notifier.notify(&Notification::normal(
            "Item Updated",
            format!("\"{}\" has been updated.", title),
        ));
    }

    /// Deletes an item by id, after confirmation.
    pub fn delete_item(&mut self, id: &str) {
        let Some(item) = self.data.items.iter().find(|i| i.id == id) else {
            debug!("delete_item: no item with id {}", id);
            return;
        };

        let prompt = format!("You are about to delete \"{}\".", item.title);
        if !self.gate.confirm(&prompt) {
            info!("item deletion cancelled: {}", id);
            return;
        }

        self.data.items.retain(|i| i.id != id);

        info!("deleted item {}", id);
        self.persist();
        self.notifier.notify(&Notification::normal(
            "Item Deleted",
            "The item has been deleted.",
        ));
    }

    /// Reassigns an item to another group. Moving to the current group is
    /// an idempotent no-op that still reports success.
    pub fn move_item(&mut self, item_id: &str, target_group_id: &str) {
        let Some(item) = self.data.items.iter_mut().find(|i| i.id == item_id) else {
            debug!("move_item: no item with id {}", item_id);
            return;
        };

        item.group_id = target_group_id.to_string();
        let title = item.title.clone();

        self.persist();
        self.notifier.notify(&Notification::normal(
            "Item Moved",
            format!("\"{}\" has been moved.", title),
        ));
    }

    /// Creates a full copy of an item with a fresh identity: new id, title
    /// suffixed with " (copy)", reset access bookkeeping, payload copied
    /// verbatim.
    pub fn duplicate_item(&mut self, item_id: &str) -> Option<ContentItem> {
        let Some(original) = self.data.items.iter().find(|i| i.id == item_id).cloned() else {
            debug!("duplicate_item: no item with id {}", item_id);
            return None;
        };

        let copy = ContentItem {
            id: self.ids.next_id(),
            title: format!("{} (copy)", original.title),
            created_at: Utc::now(),
            access_count: 0,
            last_accessed: None,
            ..original
        };
        info!("duplicated item {} as {}", item_id, copy.id);
        self.data.items.push(copy.clone());

        self.persist();
        self.notifier.notify(&Notification::normal(
            "Item Duplicated",
            format!("\"{}\" has been created.", copy.title),
        ));
        Some(copy)
    }

    /// Records one access event. This is the sole path that changes access
    /// counts and last-accessed stamps; exactly one stat entry is appended
    /// per call.
    pub fn log_access(&mut self, target_id: &str, target_type: TargetType) {
        let now = Utc::now();

        match target_type {
            TargetType::Group => {
                if let Some(group) = self.data.groups.iter_mut().find(|g| g.id == target_id) {
                    group.access_count += 1;
                }
            }
            TargetType::Item => {
                if let Some(item) = self.data.items.iter_mut().find(|i| i.id == target_id) {
                    item.access_count += 1;
                    item.last_accessed = Some(now);
                }
            }
        }

        self.data.stats.push(StatLog {
            id: self.ids.next_id(),
            target_id: target_id.to_string(),
            target_type,
            timestamp: now,
        });

        self.persist();
    }

    /// Wholesale-replaces the current state with an imported aggregate and
    /// resets the selection to its first group.
    pub fn import_data(&mut self, data: AppData) {
        info!(
            "importing {} groups, {} items, {} stat entries",
            data.groups.len(),
            data.items.len(),
            data.stats.len()
        );
        self.active_group_id = data.groups.first().map(|g| g.id.clone());
        self.data = data;

        self.persist();
        self.notifier.notify(&Notification::normal(
            "Import Successful",
            "Your data has been imported.",
        ));
    }

    /// Parses a backup file and applies it via [`Self::import_data`]. A
    /// file that fails validation leaves the current state untouched.
    pub fn import_file(&mut self, path: &Path) {
        match self.store.import(path) {
            Ok(data) => self.import_data(data),
            Err(e) => {
                warn!("import of {} failed: {}", path.display(), e);
                self.notifier.notify(&Notification::destructive(
                    "Import Failed",
                    "The imported file is not valid.",
                ));
            }
        }
    }

    /// Writes a dated backup of the full aggregate into `dir`.
    pub fn export_data(&self, dir: &Path) -> Option<PathBuf> {
        match self.store.export(&self.data, dir) {
            Ok(path) => {
                self.notifier.notify(&Notification::normal(
                    "Export Successful",
                    format!("Your data has been written to {}.", path.display()),
                ));
                Some(path)
            }
            Err(e) => {
                warn!("export failed: {}", e);
                self.notifier.notify(&Notification::destructive(
                    "Export Failed",
                    "Could not export your data.",
                ));
                None
            }
        }
    }

    /// Fire-and-forget save. The in-memory mutation stands even when the
    /// write fails; the user only loses durability, not their session.
    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.data) {
            warn!("failed to persist app data: {}", e);
            self.notifier.notify(&Notification::destructive(
                "Save Failed",
                "Could not save your changes. The data file may be unwritable or the disk full.",
            ));
        }
    }
}
