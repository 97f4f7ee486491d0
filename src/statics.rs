// Central place for UI strings and other non-localized constants.
// Keep these out of gui.rs to reduce duplication and make tweaks safer.

// Storage and file names.
pub const APP_DIR: &str = "l10n-editor";
pub const STORE_FILE_NAME: &str = "store.json";
pub const STORAGE_KEY_ITEMS: &str = "items";
pub const EXPORT_FILE_NAME: &str = "items.json";
pub const JSON_EXTENSIONS: &[&str] = &["json"];

// Key path handling.
pub const KEY_SEPARATOR: char = '.';
pub const KEY_SEPARATOR_STR: &str = ".";
pub const LITERAL_NULL: &str = "null";

// English UI strings (EN_ prefix to make future localization easier)
pub const EN_APP_TITLE: &str = "l10n string manager";

pub const EN_BTN_IMPORT: &str = "Import...";
pub const EN_BTN_DOWNLOAD: &str = "Download JSON";
pub const EN_BTN_CLEAR_ALL: &str = "Clear";
pub const EN_BTN_CLEAR: &str = "Clear";
pub const EN_BTN_CONFIRM_CLEAR: &str = "Clear all";
pub const EN_BTN_CANCEL: &str = "Cancel";

pub const EN_CHK_RESTORE_ARRAYS: &str = "Restore arrays";
pub const EN_HINT_RESTORE_ARRAYS: &str = "Export nested objects keyed 0, 1, 2... as JSON arrays. \
Off: arrays come back as objects keyed by index.";

pub const EN_FILTER_JSON: &str = "JSON";

pub const EN_HOME_HEADING: &str = "Add a file";
pub const EN_HOME_INSTRUCTIONS: &str =
    "Import a JSON file to edit its key-value pairs. Nested keys will be flattened.";

pub const EN_JUMP_TO_SECTION: &str = "Jump to section";
pub const EN_PREFIX_EDITING: &str = "Editing:";
pub const EN_SUFFIX_ITEMS: &str = "items";

pub const EN_WINDOW_CONFIRM_CLEAR: &str = "Clear all items?";
pub const EN_CONFIRM_CLEAR: &str =
    "Are you sure you want to clear all items? This cannot be undone.";

pub const EN_BADGE_MEMORY_ONLY: &str = "memory only";
pub const EN_HINT_MEMORY_ONLY: &str = "Storage is unavailable; edits are kept for this session only.";

pub const EN_STATUS_IMPORTED: &str = "Imported";
pub const EN_STATUS_EXPORTED: &str = "Exported";
pub const EN_STATUS_CLEARED: &str = "Cleared all items";

pub const EN_ERR_IMPORT: &str = "Failed to import";
pub const EN_ERR_EXPORT: &str = "Failed to export";
pub const EN_ERR_EDIT: &str = "Failed to apply edit";
