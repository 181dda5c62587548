use crate::statics;
use crate::{
    AppConfig, CachedProfile, CategorySelection, LoadedProfile, ProfileCache, ProfileError,
    SettingEntry, is_supported_file_name,
};
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::path::{Path, PathBuf};

pub fn run_gui(config: AppConfig) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    let title = format!("{} {}", statics::EN_APP_TITLE, env!("CARGO_PKG_VERSION"));
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(ConfigEditorApp::new(config)))),
    )
}

/// Application state: the open profile (if any) plus view state for the editor step.
#[derive(Default)]
struct ConfigEditorApp {
    profile: Option<LoadedProfile>,
    cache: Option<ProfileCache>,
    dialog_dir: Option<PathBuf>,
    active: CategorySelection,
    search_query: String,
    search_request_focus: bool,
    status: String,
    last_error: Option<String>,
    theme_dark: bool,
}

/// A single value change collected while drawing, applied after the frame's panels.
struct ValueEdit {
    category: String,
    key: String,
    value: String,
}

impl ConfigEditorApp {
    fn new(config: AppConfig) -> Self {
        let mut app = Self {
            cache: config.cache(),
            theme_dark: true,
            ..Default::default()
        };

        if let Some(path) = config.initial_file.as_deref() {
            app.open_path(path);
        } else if let Some(cached) = app.cache.as_ref().and_then(ProfileCache::load) {
            let status = format!("Restored {}", cached.file_name);
            app.set_profile(cached.into_profile(), status);
        }
        app
    }

    fn default_settings_dir() -> Option<PathBuf> {
        let home = std::env::var_os("USERPROFILE")
            .or_else(|| std::env::var_os("HOME"))
            .map(PathBuf::from)?;

        Some(home.join("Documents").join("Battlefield 6").join("settings"))
    }

    fn file_dialog(&self) -> rfd::FileDialog {
        let mut dlg = rfd::FileDialog::new()
            .add_filter(statics::EN_DIALOG_FILTER, &statics::CFG_FILE_EXTENSIONS)
            .add_filter(statics::EN_DIALOG_FILTER_ALL, &["*"]);

        if let Some(dir) = self
            .dialog_dir
            .clone()
            .or_else(Self::default_settings_dir)
            .filter(|d| d.is_dir())
        {
            dlg = dlg.set_directory(dir);
        }

        dlg
    }

    fn pick_file(&mut self) {
        let Some(path) = self.file_dialog().pick_file() else {
            return;
        };
        self.open_path(&path);
    }

    fn open_path(&mut self, path: &Path) {
        match LoadedProfile::load_path(path) {
            Ok(profile) => {
                self.dialog_dir = path.parent().map(PathBuf::from);
                self.set_profile(profile, format!("Loaded {}", path.display()));
            }
            Err(e) => self.show_load_error(&e),
        }
    }

    fn open_dropped(&mut self, file: &egui::DroppedFile) {
        if let Some(path) = file.path.as_deref() {
            self.open_path(path);
            return;
        }
        match load_dropped_bytes(file) {
            Ok(profile) => {
                let status = format!("Loaded {}", profile.file_name);
                self.set_profile(profile, status);
            }
            Err(e) => self.show_load_error(&e),
        }
    }

    fn show_load_error(&mut self, e: &ProfileError) {
        tracing::warn!(error = %e, "profile not loaded");
        self.last_error = Some(e.to_string());
    }

    fn set_profile(&mut self, profile: LoadedProfile, status: String) {
        self.active = profile
            .document
            .category_names()
            .next()
            .map(CategorySelection::named)
            .unwrap_or_default();
        self.search_query.clear();
        self.search_request_focus = false;
        self.status = status;
        self.last_error = None;
        self.persist(&profile);
        self.profile = Some(profile);
    }

    fn go_back(&mut self) {
        // The cached copy stays; it is only replaced by the next load or edit.
        self.profile = None;
        self.active = CategorySelection::All;
        self.search_query.clear();
        self.status.clear();
        self.last_error = None;
    }

    fn persist(&self, profile: &LoadedProfile) {
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        if let Err(e) = cache.store(&CachedProfile::from_profile(profile)) {
            tracing::warn!(error = %format!("{e:#}"), "could not update cache");
        }
    }

    fn export_profile(&mut self, profile: &mut LoadedProfile) {
        let dlg = self
            .file_dialog()
            .set_file_name(profile.export_file_name());

        let Some(path) = dlg.save_file() else {
            return;
        };

        if let Err(e) = profile.save_to_path(&path) {
            self.last_error = Some(format!("Failed to export: {e:#}"));
        } else {
            self.dialog_dir = path.parent().map(PathBuf::from);
            self.status = format!("Exported {}", path.display());
            self.last_error = None;
            self.persist(profile);
        }
    }

    fn apply_edits(&mut self, profile: &mut LoadedProfile, edits: Vec<ValueEdit>) {
        if edits.is_empty() {
            return;
        }
        for edit in edits {
            if !profile.set_value(&edit.category, &edit.key, &edit.value) {
                self.last_error = Some(format!("Setting {}.{} not found", edit.category, edit.key));
            }
        }
        self.persist(profile);
    }

    fn selectable_row_left(
        ui: &mut egui::Ui,
        selected: bool,
        text: &str,
        row_h: f32,
    ) -> egui::Response {
        let w = ui.available_width();
        let (rect, response) = ui.allocate_exact_size(egui::vec2(w, row_h), egui::Sense::click());
        let response = response.on_hover_cursor(egui::CursorIcon::PointingHand);

        let visuals = ui.style().interact_selectable(&response, selected);
        if ui.is_rect_visible(rect) {
            ui.painter()
                .rect_filled(rect, visuals.corner_radius, visuals.bg_fill);
            ui.painter().rect_stroke(
                rect,
                visuals.corner_radius,
                visuals.bg_stroke,
                egui::StrokeKind::Inside,
            );

            let font_id = egui::TextStyle::Button.resolve(ui.style());
            let text_pos = rect.left_center() + egui::vec2(6.0, 0.0);
            ui.painter().text(
                text_pos,
                egui::Align2::LEFT_CENTER,
                text,
                font_id,
                visuals.text_color(),
            );
        }

        response
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

    fn render_upload_step(&mut self, ctx: &egui::Context, hovering_file: bool) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(48.0);
                ui.label(egui::RichText::new(statics::EN_HOME_HEADING).size(36.0).strong());
                ui.label(
                    egui::RichText::new(statics::EN_HOME_SUBHEADING)
                        .size(20.0)
                        .color(ui.visuals().selection.bg_fill),
                );
                ui.add_space(32.0);
            });

            ui.vertical_centered(|ui| {
                ui.set_max_width(640.0);
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.strong(statics::EN_HOME_STEP);
                    ui.label(statics::EN_HOME_INSTRUCTIONS);
                    ui.add_space(12.0);

                    let stroke_color = if hovering_file {
                        ui.visuals().selection.bg_fill
                    } else {
                        ui.visuals().widgets.noninteractive.bg_stroke.color
                    };
                    egui::Frame::group(ui.style())
                        .stroke(egui::Stroke::new(2.0, stroke_color))
                        .inner_margin(egui::Margin::same(32))
                        .show(ui, |ui| {
                            ui.vertical_centered(|ui| {
                                let drop_text = if hovering_file {
                                    statics::EN_HOME_DROP_HOVER
                                } else {
                                    statics::EN_HOME_DROP
                                };
                                ui.label(egui::RichText::new(drop_text).size(18.0).strong());
                                ui.label(statics::EN_HOME_OR_BROWSE);
                                ui.add_space(12.0);
                                if ui.button(statics::EN_BTN_SELECT_FILE).clicked() {
                                    self.pick_file();
                                }
                            });
                        });

                    ui.add_space(12.0);
                    ui.separator();
                    ui.small(statics::EN_HOME_FORMATS);
                    ui.small(statics::EN_HOME_LOCATION);
                });
            });
        });
    }

    fn render_categories_panel(&mut self, ctx: &egui::Context, profile: &LoadedProfile) {
        egui::SidePanel::left("categories_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading(statics::EN_HEADING_CATEGORIES);
                ui.separator();
                let row_h = ui.text_style_height(&egui::TextStyle::Body) + 8.0;
                ui.push_id("categories_scroll", |ui| {
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            for name in profile.document.category_names() {
                                let selected = matches!(
                                    &self.active,
                                    CategorySelection::Named(active) if active == name
                                );
                                if Self::selectable_row_left(ui, selected, name, row_h).clicked() {
                                    self.active = CategorySelection::named(name);
                                }
                            }

                            ui.separator();
                            let selected = self.active == CategorySelection::All;
                            if Self::selectable_row_left(
                                ui,
                                selected,
                                statics::EN_CATEGORY_ALL,
                                row_h,
                            )
                            .clicked()
                            {
                                self.active = CategorySelection::All;
                            }
                        });
                });
            });
    }

    fn render_settings_panel(
        &mut self,
        ctx: &egui::Context,
        profile: &LoadedProfile,
    ) -> Vec<ValueEdit> {
        let mut edits = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                let resp = ui.add(
                    egui::TextEdit::singleline(&mut self.search_query)
                        .hint_text(statics::EN_HINT_SEARCH)
                        .desired_width(ui.available_width() - 60.0),
                );
                if self.search_request_focus {
                    resp.request_focus();
                    self.search_request_focus = false;
                }
                if ui.small_button(statics::EN_BTN_CLEAR).clicked() {
                    self.search_query.clear();
                }
            });
            ui.add_space(8.0);

            let rows = profile.document.filter(&self.active, &self.search_query);

            ui.horizontal(|ui| {
                ui.strong(view_heading(&self.active, &self.search_query));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{} {}", rows.len(), statics::EN_LABEL_SETTINGS_COUNT));
                });
            });
            ui.separator();

            if rows.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(48.0);
                    ui.weak(statics::EN_SEARCH_NO_MATCHES);
                });
                return;
            }

            let show_category = self.active == CategorySelection::All;
            let row_h = ui.text_style_height(&egui::TextStyle::Body) + 10.0;
            ui.push_id("settings_table", |ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .column(Column::initial(420.0).resizable(true))
                    .column(Column::remainder())
                    .header(row_h, |#[allow(unused_mut)] mut header| {
                        header.col(|ui| {
                            ui.strong(statics::EN_COL_KEY);
                        });
                        header.col(|ui| {
                            ui.strong(statics::EN_COL_VALUE);
                        });
                    })
                    .body(|#[allow(unused_mut)] mut body| {
                        body.rows(row_h, rows.len(), |#[allow(unused_mut)] mut row| {
                            let entry = &rows[row.index()];
                            row.col(|ui| {
                                let label = if show_category {
                                    entry.full_key()
                                } else {
                                    entry.key.clone()
                                };
                                ui.monospace(label)
                                    .on_hover_text(statics::EN_SETTING_DESCRIPTION);
                            });
                            row.col(|ui| {
                                if let Some(edit) = render_value_input(ui, entry) {
                                    edits.push(edit);
                                }
                            });
                        });
                    });
            });
        });

        edits
    }
}

fn render_value_input(ui: &mut egui::Ui, entry: &SettingEntry) -> Option<ValueEdit> {
    let mut value = entry.value.clone();
    let resp = ui.add(
        egui::TextEdit::singleline(&mut value)
            .id_salt(entry.full_key())
            .font(egui::TextStyle::Monospace)
            .desired_width(f32::INFINITY),
    );
    resp.changed().then(|| ValueEdit {
        category: entry.category.clone(),
        key: entry.key.clone(),
        value,
    })
}

/// Heading above the settings list.
fn view_heading(active: &CategorySelection, query: &str) -> String {
    if query.is_empty() {
        active.label().to_uppercase()
    } else {
        statics::EN_HEADING_SEARCH_RESULTS.to_string()
    }
}

/// Load a dropped file that only carries its bytes (e.g. on the web or some Linux DnD sources).
fn load_dropped_bytes(file: &egui::DroppedFile) -> Result<LoadedProfile, ProfileError> {
    if !is_supported_file_name(&file.name) {
        return Err(ProfileError::UnsupportedFile(file.name.clone()));
    }
    let bytes = file.bytes.as_deref().unwrap_or_default();
    LoadedProfile::from_bytes(&file.name, bytes)
}

impl eframe::App for ConfigEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (dropped, hovering_file) = ctx.input(|i| {
            (
                i.raw.dropped_files.first().cloned(),
                !i.raw.hovered_files.is_empty(),
            )
        });
        if let Some(file) = dropped {
            self.open_dropped(&file);
        }

        if self.profile.is_some()
            && ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::F))
        {
            self.search_request_focus = true;
        }

        let Some(mut profile) = self.profile.take() else {
            self.render_error_bar(ctx);
            self.render_upload_step(ctx, hovering_file);
            return;
        };

        let mut back_requested = false;
        let mut export_requested = false;

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                if ui.button(statics::EN_BTN_BACK).clicked() {
                    back_requested = true;
                }
                ui.separator();
                ui.strong(statics::EN_HOME_SUBHEADING);
                ui.label(&profile.file_name);
                if profile.dirty {
                    ui.colored_label(egui::Color32::YELLOW, statics::EN_BADGE_DIRTY);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(statics::EN_BTN_EXPORT).clicked() {
                        export_requested = true;
                    }
                    if ui.button(statics::EN_BTN_TOGGLE_THEME).clicked() {
                        self.theme_dark = !self.theme_dark;
                        if self.theme_dark {
                            ctx.set_visuals(egui::Visuals::dark());
                        } else {
                            ctx.set_visuals(egui::Visuals::light());
                        }
                    }
                    if !self.status.is_empty() {
                        ui.separator();
                        ui.label(&self.status);
                    }
                });
            });
        });

        self.render_error_bar(ctx);

        // The bottom status bar must be shown before side/central panels so it reserves
        // space across the full window width.
        egui::TopBottomPanel::bottom("bottom_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let file_label = profile
                    .source_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| profile.file_name.clone());
                ui.label(file_label);
                ui.separator();
                ui.label(format!(
                    "{} {}",
                    statics::EN_LABEL_CATEGORIES_COUNT,
                    profile.document.category_count()
                ));
                ui.separator();
                ui.label(format!(
                    "{} {}",
                    statics::EN_LABEL_SETTINGS_TOTAL,
                    profile.document.len()
                ));
                ui.separator();
                ui.label(format!("line endings: {:?}", profile.line_ending));
            });
        });

        self.render_categories_panel(ctx, &profile);
        let edits = self.render_settings_panel(ctx, &profile);
        self.apply_edits(&mut profile, edits);

        if export_requested {
            self.export_profile(&mut profile);
        }

        if back_requested {
            self.go_back();
        } else {
            self.profile = Some(profile);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigEditorApp, load_dropped_bytes, view_heading};
    use crate::{AppConfig, CategorySelection, ProfileError};
    use eframe::egui;
    use std::sync::Arc;

    fn dropped(name: &str, bytes: &[u8]) -> egui::DroppedFile {
        egui::DroppedFile {
            name: name.to_string(),
            bytes: Some(Arc::from(bytes)),
            ..Default::default()
        }
    }

    #[test]
    fn heading_follows_search_state() {
        assert_eq!(view_heading(&CategorySelection::All, ""), "ALL SETTINGS");
        assert_eq!(
            view_heading(&CategorySelection::named("GstAudio"), ""),
            "GSTAUDIO"
        );
        assert_eq!(
            view_heading(&CategorySelection::named("GstAudio"), "vol"),
            "SEARCH RESULTS"
        );
    }

    #[test]
    fn dropped_bytes_are_checked_by_name_then_parsed() {
        let err = load_dropped_bytes(&dropped("save.json", b"A.B 1")).unwrap_err();
        assert!(matches!(err, ProfileError::UnsupportedFile(_)));

        let err = load_dropped_bytes(&dropped("empty.cfg", b"# nothing\n")).unwrap_err();
        assert!(matches!(err, ProfileError::NoValidEntries));

        let profile = load_dropped_bytes(&dropped("PROFSAVE_profile", b"GstAudio.MasterVolume 75"))
            .unwrap();
        assert_eq!(profile.document.get("GstAudio", "MasterVolume"), Some("75"));
    }

    #[test]
    fn loading_selects_first_category_and_back_keeps_cache() {
        let dir = tempfile::tempdir().unwrap();
        let profile_path = dir.path().join("PROFSAVE_profile");
        std::fs::write(&profile_path, "GstRender.Dx11Enable 1\nGstAudio.MasterVolume 75\n").unwrap();
        let cache_path = dir.path().join("cache.json");

        let config = AppConfig::new(Some(profile_path), false, Some(cache_path.clone()));
        let mut app = ConfigEditorApp::new(config);
        assert!(app.profile.is_some());
        assert_eq!(app.active, CategorySelection::named("GstRender"));
        assert!(cache_path.exists());

        app.go_back();
        assert!(app.profile.is_none());
        assert!(cache_path.exists());

        // A fresh start restores the cached session.
        let app = ConfigEditorApp::new(AppConfig::new(None, false, Some(cache_path)));
        let restored = app.profile.expect("restored from cache");
        assert_eq!(restored.file_name, "PROFSAVE_profile");
        assert_eq!(restored.document.get("GstAudio", "MasterVolume"), Some("75"));
    }

    #[test]
    fn unsupported_initial_file_shows_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        std::fs::write(&path, "GstAudio.MasterVolume 75").unwrap();

        let app = ConfigEditorApp::new(AppConfig::new(Some(path), true, None));
        assert!(app.profile.is_none());
        assert!(
            app.last_error
                .as_deref()
                .is_some_and(|e| e.starts_with("Please upload a .cfg or .txt file"))
        );
    }
}
