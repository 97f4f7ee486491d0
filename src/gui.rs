use crate::statics;
use crate::store::{AnyStore, KvStore};
use crate::{EditorError, EditorState, view};
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::path::{Path, PathBuf};
use tracing::warn;

pub fn run_gui(state: EditorState<AnyStore>, import: Option<PathBuf>) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1024.0, 800.0]),
        ..Default::default()
    };
    let title = format!("{} {}", statics::EN_APP_TITLE, env!("CARGO_PKG_VERSION"));

    let mut app = EditorApp::new(state);
    if let Some(path) = import {
        app.import_from(&path);
    }

    eframe::run_native(&title, options, Box::new(move |_cc| Ok(Box::new(app))))
}

/// Owns the editor state and the transient UI state around it
/// (dialog directory, status line, pending jump, confirmation window).
struct EditorApp<S> {
    state: EditorState<S>,
    dialog_dir: Option<PathBuf>,
    status: String,
    last_error: Option<String>,
    confirm_clear_open: bool,
    jump_selected: Option<String>,
    jump_pending: Option<String>,
}

impl<S: KvStore> EditorApp<S> {
    fn new(state: EditorState<S>) -> Self {
        let mut app = Self {
            state,
            dialog_dir: None,
            status: String::new(),
            last_error: None,
            confirm_clear_open: false,
            jump_selected: None,
            jump_pending: None,
        };
        app.take_storage_error();
        app
    }

    fn take_storage_error(&mut self) {
        if let Some(err) = self.state.take_storage_error() {
            self.last_error = Some(err.to_string());
        }
    }

    fn report(&mut self, prefix: &str, err: &EditorError) {
        warn!(error = %err, "{prefix}");
        self.last_error = Some(format!("{prefix}: {err}"));
    }

    fn file_dialog(&self) -> rfd::FileDialog {
        let mut dlg =
            rfd::FileDialog::new().add_filter(statics::EN_FILTER_JSON, statics::JSON_EXTENSIONS);
        if let Some(dir) = self.dialog_dir.clone() {
            dlg = dlg.set_directory(dir);
        }
        dlg
    }

    fn import_file(&mut self) {
        let Some(path) = self.file_dialog().pick_file() else {
            return;
        };
        self.import_from(&path);
    }

    fn import_from(&mut self, path: &Path) {
        match self.state.import_path(path) {
            Ok(()) => {
                self.dialog_dir = path.parent().map(PathBuf::from);
                self.status = format!("{} {}", statics::EN_STATUS_IMPORTED, path.display());
                self.last_error = None;
                self.jump_selected = None;
                self.jump_pending = None;
            }
            Err(e) => self.report(statics::EN_ERR_IMPORT, &e),
        }
        self.take_storage_error();
    }

    fn export_file(&mut self) {
        // Surface structural conflicts before asking for a destination.
        if let Err(e) = self.state.export_value() {
            self.report(statics::EN_ERR_EXPORT, &e);
            return;
        }

        let Some(path) = self
            .file_dialog()
            .set_file_name(statics::EXPORT_FILE_NAME)
            .save_file()
        else {
            return;
        };

        match self.state.export_to_path(&path) {
            Ok(()) => {
                self.dialog_dir = path.parent().map(PathBuf::from);
                self.status = format!("{} {}", statics::EN_STATUS_EXPORTED, path.display());
                self.last_error = None;
            }
            Err(e) => self.report(statics::EN_ERR_EXPORT, &e),
        }
    }

    fn apply_edit(&mut self, key: &str, value: String) {
        if let Err(e) = self.state.set_value(key, value) {
            self.report(statics::EN_ERR_EDIT, &e);
        }
        self.take_storage_error();
    }

    fn clear_all(&mut self) {
        self.state.clear();
        self.jump_selected = None;
        self.jump_pending = None;
        self.status = statics::EN_STATUS_CLEARED.to_string();
        self.take_storage_error();
    }

    fn select_section(&mut self, key: &str) {
        self.jump_selected = Some(key.to_string());
        self.jump_pending = Some(key.to_string());
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                if ui.button(statics::EN_BTN_IMPORT).clicked() {
                    self.import_file();
                }

                let has_items = !self.state.is_empty();
                if ui
                    .add_enabled(has_items, egui::Button::new(statics::EN_BTN_DOWNLOAD))
                    .clicked()
                {
                    self.export_file();
                }

                let mut options = self.state.export_options();
                if ui
                    .checkbox(&mut options.restore_arrays, statics::EN_CHK_RESTORE_ARRAYS)
                    .on_hover_text(statics::EN_HINT_RESTORE_ARRAYS)
                    .changed()
                {
                    self.state.set_export_options(options);
                }

                if has_items {
                    ui.separator();
                    ui.label(format!(
                        "{} {} {}",
                        statics::EN_PREFIX_EDITING,
                        self.state.len(),
                        statics::EN_SUFFIX_ITEMS
                    ));
                    if ui.small_button(statics::EN_BTN_CLEAR_ALL).clicked() {
                        self.confirm_clear_open = true;
                    }

                    ui.separator();
                    self.render_jump_selector(ui);
                }

                if self.state.is_degraded() {
                    ui.separator();
                    ui.colored_label(egui::Color32::YELLOW, statics::EN_BADGE_MEMORY_ONLY)
                        .on_hover_text(statics::EN_HINT_MEMORY_ONLY);
                }

                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(&self.status);
                }
            });
        });
    }

    fn render_jump_selector(&mut self, ui: &mut egui::Ui) {
        let sections = self.state.sections();
        let selected_text = self
            .jump_selected
            .as_ref()
            .and_then(|key| sections.iter().find(|s| &s.key == key))
            .map_or(statics::EN_JUMP_TO_SECTION, |s| s.label.as_str())
            .to_string();

        let mut picked = None;
        egui::ComboBox::from_id_salt("jump_to_section")
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for section in &sections {
                    let selected = self.jump_selected.as_deref() == Some(section.key.as_str());
                    if ui.selectable_label(selected, section.label.as_str()).clicked() {
                        picked = Some(section.key.clone());
                    }
                }
            });

        if let Some(key) = picked {
            self.select_section(&key);
        }
    }

    fn render_confirm_clear(&mut self, ctx: &egui::Context) {
        if !self.confirm_clear_open {
            return;
        }

        let mut open = true;
        let mut confirmed = false;
        let mut cancelled = false;
        egui::Window::new(statics::EN_WINDOW_CONFIRM_CLEAR)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(statics::EN_CONFIRM_CLEAR);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    let clear = egui::Button::new(
                        egui::RichText::new(statics::EN_BTN_CONFIRM_CLEAR).color(egui::Color32::RED),
                    );
                    if ui.add(clear).clicked() {
                        confirmed = true;
                    }
                    if ui.button(statics::EN_BTN_CANCEL).clicked() {
                        cancelled = true;
                    }
                });
            });

        if confirmed {
            self.clear_all();
        }
        self.confirm_clear_open = open && !confirmed && !cancelled;
    }

    fn render_error_bar(&mut self, ctx: &egui::Context) {
        let Some(err) = self.last_error.clone() else {
            return;
        };
        egui::TopBottomPanel::top("error_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::RED, err);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button(statics::EN_BTN_CLEAR).clicked() {
                        self.last_error = None;
                    }
                });
            });
        });
    }

    fn render_home(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() / 4.0);
                ui.heading(statics::EN_HOME_HEADING);
                ui.add_space(8.0);
                ui.label(statics::EN_HOME_INSTRUCTIONS);
                ui.add_space(16.0);
                if ui.button(statics::EN_BTN_IMPORT).clicked() {
                    self.import_file();
                }
            });
        });
    }

    fn render_entries(&mut self, ctx: &egui::Context) {
        let jump = self.jump_pending.take();
        let mut pending_edit: Option<(String, String)> = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            let row_h = ui.text_style_height(&egui::TextStyle::Body) + 8.0;
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for (top, entries) in self.state.groups() {
                        let header = ui.add(egui::Label::new(
                            egui::RichText::new(view::labelize(top)).strong().size(16.0),
                        ));
                        if jump.as_deref() == Some(top) {
                            header.scroll_to_me(Some(egui::Align::Min));
                        }
                        ui.separator();

                        ui.push_id(top, |ui| {
                            TableBuilder::new(ui)
                                .striped(true)
                                .vscroll(false)
                                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                                .column(Column::initial(280.0).resizable(true))
                                .column(Column::remainder())
                                .body(|mut body| {
                                    for entry in entries {
                                        body.row(row_h, |mut row| {
                                            row.col(|ui| {
                                                ui.monospace(&entry.key);
                                            });
                                            row.col(|ui| {
                                                let mut value = entry.value.clone();
                                                let resp = ui.add(
                                                    egui::TextEdit::singleline(&mut value)
                                                        .desired_width(ui.available_width()),
                                                );
                                                if resp.changed() {
                                                    pending_edit = Some((entry.key.clone(), value));
                                                }
                                            });
                                        });
                                    }
                                });
                        });
                        ui.add_space(12.0);
                    }
                });
        });

        if let Some((key, value)) = pending_edit {
            self.apply_edit(&key, value);
        }
    }
}

impl<S: KvStore + 'static> eframe::App for EditorApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_top_bar(ctx);
        self.render_error_bar(ctx);
        self.render_confirm_clear(ctx);

        if self.state.is_empty() {
            self.render_home(ctx);
        } else {
            self.render_entries(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EditorApp;
    use crate::EditorState;
    use crate::store::MemoryStore;

    fn app_with(json: &str) -> EditorApp<MemoryStore> {
        let mut state = EditorState::load(MemoryStore::new());
        state.import_text(json).unwrap();
        EditorApp::new(state)
    }

    #[test]
    fn failed_import_reports_and_keeps_items() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ nope").unwrap();

        let mut app = app_with(r#"{"a": "1"}"#);
        app.import_from(&path);

        assert!(app.last_error.as_deref().is_some_and(|e| e.contains("invalid JSON")));
        assert_eq!(app.state.entries().get("a"), Some("1"));
    }

    #[test]
    fn successful_import_resets_jump_and_remembers_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("good.json");
        std::fs::write(&path, r#"{"greeting": {"hello": "Hi"}}"#).unwrap();

        let mut app = app_with(r#"{"a": "1"}"#);
        app.select_section("a");
        app.import_from(&path);

        assert!(app.last_error.is_none());
        assert!(app.jump_selected.is_none());
        assert_eq!(app.dialog_dir.as_deref(), Some(dir.path()));
        assert_eq!(app.state.entries().get("greeting.hello"), Some("Hi"));
    }

    #[test]
    fn editing_unknown_key_reports_error() {
        let mut app = app_with(r#"{"a": "1"}"#);
        app.apply_edit("missing", "x".to_string());
        assert!(app.last_error.is_some());

        app.last_error = None;
        app.apply_edit("a", "2".to_string());
        assert!(app.last_error.is_none());
        assert_eq!(app.state.entries().get("a"), Some("2"));
    }

    #[test]
    fn clear_all_empties_state() {
        let mut app = app_with(r#"{"a": {"b": "1"}}"#);
        app.select_section("a");
        app.clear_all();
        assert!(app.state.is_empty());
        assert!(app.jump_pending.is_none());
    }
}
