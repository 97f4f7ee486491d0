use crate::flatten::{ExportOptions, parse_and_flatten, unflatten_with};
use crate::store::KvStore;
use crate::view::{self, Section};
use crate::{Collection, EditorError, Entry, StoreError, statics};
use indexmap::IndexMap;
use serde_json::Value;
use std::{fs, path::Path};
use tracing::{debug, info, warn};

/// The editor's single source of truth: the current collection plus the
/// store it is mirrored to.
///
/// Every mutation is written through to the store under the `items` key. If
/// the store fails, the state switches to memory-only for the rest of the
/// session and keeps working.
#[derive(Debug)]
pub struct EditorState<S> {
    items: Collection,
    store: S,
    degraded: bool,
    storage_error: Option<StoreError>,
    export_options: ExportOptions,
}

impl<S: KvStore> EditorState<S> {
    /// Loads the persisted collection from `store`. A missing or unreadable
    /// value yields an empty collection. A corrupt store also starts empty but
    /// stays writable; only read failures degrade the session.
    pub fn load(store: S) -> Self {
        let mut state = Self {
            items: Collection::new(),
            store,
            degraded: false,
            storage_error: None,
            export_options: ExportOptions::default(),
        };

        match state.store.get(statics::STORAGE_KEY_ITEMS) {
            Ok(Some(text)) => match serde_json::from_str::<Collection>(&text) {
                Ok(items) => {
                    info!(count = items.len(), "Loaded items from store");
                    state.items = items;
                }
                Err(e) => warn!(error = %e, "Stored items are not valid; starting empty"),
            },
            Ok(None) => debug!("No stored items"),
            Err(e @ StoreError::Corrupt { .. }) => {
                warn!(error = %e, "Store is corrupt; starting empty");
            }
            Err(e) => state.degrade(e),
        }

        state
    }

    pub fn entries(&self) -> &Collection {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn groups(&self) -> IndexMap<&str, Vec<&Entry>> {
        view::group(&self.items)
    }

    pub fn sections(&self) -> Vec<Section> {
        view::sections(&self.items)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// True once a store write or read has failed.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// The store failure that caused degradation, reported once.
    pub fn take_storage_error(&mut self) -> Option<EditorError> {
        self.storage_error.take().map(EditorError::StorageUnavailable)
    }

    pub fn export_options(&self) -> ExportOptions {
        self.export_options
    }

    pub fn set_export_options(&mut self, options: ExportOptions) {
        self.export_options = options;
    }

    /// Replaces the whole collection with the flattened contents of `text`.
    /// On a parse failure the current collection is left as it was.
    pub fn import_text(&mut self, text: &str) -> Result<(), EditorError> {
        let items = parse_and_flatten(text)?;
        info!(count = items.len(), "Imported items");
        self.items = items;
        self.persist();
        Ok(())
    }

    pub fn import_path(&mut self, path: &Path) -> Result<(), EditorError> {
        let text = fs::read_to_string(path).map_err(|source| EditorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.import_text(&text)
    }

    /// Replaces the value of an existing entry.
    pub fn set_value(&mut self, key: &str, value: impl Into<String>) -> Result<(), EditorError> {
        let value = value.into();
        if self.items.get(key) == Some(value.as_str()) {
            return Ok(());
        }
        if !self.items.set_value(key, value) {
            return Err(EditorError::UnknownKey(key.to_string()));
        }
        self.persist();
        Ok(())
    }

    /// Drops every entry and removes the persisted copy.
    pub fn clear(&mut self) {
        info!(count = self.items.len(), "Clearing all items");
        self.items.clear();
        if self.degraded {
            return;
        }
        if let Err(e) = self.store.remove(statics::STORAGE_KEY_ITEMS) {
            self.degrade(e);
        }
    }

    pub fn export_value(&self) -> Result<Value, EditorError> {
        unflatten_with(self.items.as_slice(), self.export_options)
    }

    /// The nested document, pretty-printed with two-space indentation.
    pub fn export_pretty(&self) -> Result<String, EditorError> {
        let value = self.export_value()?;
        Ok(format!("{value:#}\n"))
    }

    pub fn export_to_path(&self, path: &Path) -> Result<(), EditorError> {
        let text = self.export_pretty()?;
        fs::write(path, text).map_err(|source| EditorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), count = self.items.len(), "Exported items");
        Ok(())
    }

    fn persist(&mut self) {
        if self.degraded {
            return;
        }
        let text = match serde_json::to_string(&self.items) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Could not serialize items");
                return;
            }
        };
        match self.store.set(statics::STORAGE_KEY_ITEMS, &text) {
            Ok(()) => debug!(count = self.items.len(), "Persisted items"),
            Err(e) => self.degrade(e),
        }
    }

    fn degrade(&mut self, err: StoreError) {
        warn!(error = %err, "Storage unavailable; continuing in memory only");
        self.degraded = true;
        self.storage_error = Some(err);
    }
}
