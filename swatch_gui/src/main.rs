use eframe::egui;
use swatch_core::{
    ColorEntry, ExportFormat, HslField, PaletteStore, Rgba, RgbaField, Session, StoreConfig,
};
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let explicit = std::env::args().nth(1);
    let config = match StoreConfig::resolve_with(explicit.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("{e}, keeping palettes next to the executable");
            StoreConfig::at("paletteData.json")
        }
    };

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Swatch",
        options,
        Box::new(|_cc| Ok(Box::new(SwatchApp::new(config)))),
    )
}

enum DialogKind {
    AddPalette,
    AddColor { palette: usize },
    AddColorToNewPalette,
    RenamePalette { palette: usize },
    RenameColor { palette: usize, color: ColorEntry },
    DeletePalette { palette: usize },
    DeleteColor { palette: usize, color: ColorEntry },
}

struct Dialog {
    kind: DialogKind,
    name: String,
    // only used by AddColorToNewPalette
    palette_name: String,
}

impl Dialog {
    fn new(kind: DialogKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            palette_name: String::new(),
        }
    }

    fn title(&self) -> &'static str {
        match self.kind {
            DialogKind::AddPalette => "New Palette",
            DialogKind::AddColor { .. } | DialogKind::AddColorToNewPalette => "Add Color",
            DialogKind::RenamePalette { .. } => "Rename Palette",
            DialogKind::RenameColor { .. } => "Rename Color",
            DialogKind::DeletePalette { .. } | DialogKind::DeleteColor { .. } => "Confirm Delete",
        }
    }

    fn asks_for_name(&self) -> bool {
        !matches!(
            self.kind,
            DialogKind::DeletePalette { .. } | DialogKind::DeleteColor { .. }
        )
    }
}

struct SwatchApp {
    config: StoreConfig,
    session: Session,

    // text field state for the working color editor
    hex_field: String,
    rgba_fields: [String; 4],
    hsl_fields: [String; 3],

    dialog: Option<Dialog>,
    last_error: Option<String>,
}

impl SwatchApp {
    fn new(config: StoreConfig) -> Self {
        let store = PaletteStore::open_file(&config);
        let mut app = Self {
            config,
            session: Session::new(store),
            hex_field: String::new(),
            rgba_fields: Default::default(),
            hsl_fields: Default::default(),
            dialog: None,
            last_error: None,
        };
        app.sync_fields();
        app
    }

    /// Refresh every text field from the working color.
    fn sync_fields(&mut self) {
        let working = self.session.working();
        self.hex_field = self.session.working_hex_digits();
        for (slot, field) in self.rgba_fields.iter_mut().zip(RgbaField::ALL) {
            *slot = field.get(working.rgba()).to_string();
        }
        for (slot, field) in self.hsl_fields.iter_mut().zip(HslField::ALL) {
            *slot = field.get(working.hsl()).to_string();
        }
    }

    fn report(&mut self, result: swatch_core::Result<()>) {
        self.last_error = match result {
            Ok(()) => self.session.store.last_save_error().map(|e| format!("Not saved: {e}")),
            Err(e) => Some(e.to_string()),
        };
    }

    fn finish_edit(&mut self, result: swatch_core::Result<()>) {
        self.report(result);
        self.sync_fields();
    }

    fn editor_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Working Color");
        ui.separator();

        let rgba = self.session.working().rgba();
        let (rect, _) = ui.allocate_exact_size(egui::vec2(140.0, 140.0), egui::Sense::hover());
        ui.painter().rect_filled(rect, 16.0, to_color32(rgba));

        let mut picked = rgba.to_array();
        ui.horizontal(|ui| {
            ui.label("Picker:");
            if ui.color_edit_button_srgba_unmultiplied(&mut picked).changed() {
                self.session.set_working_rgba(Rgba::from(picked));
                self.sync_fields();
            }
        });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("HEX #");
            let resp = ui.add(egui::TextEdit::singleline(&mut self.hex_field).desired_width(80.0));
            if resp.lost_focus() {
                let text = self.hex_field.clone();
                self.session.set_working_hex(&text);
                self.finish_edit(Ok(()));
            }
        });

        ui.label("RGBA");
        ui.horizontal(|ui| {
            for (i, field) in RgbaField::ALL.into_iter().enumerate() {
                let resp = ui
                    .add(egui::TextEdit::singleline(&mut self.rgba_fields[i]).desired_width(34.0))
                    .on_hover_text(field.label());
                if resp.lost_focus() {
                    let text = self.rgba_fields[i].clone();
                    let result = self.session.set_working_rgba_field(field, &text);
                    self.finish_edit(result);
                }
            }
        });

        ui.label("HSL");
        ui.horizontal(|ui| {
            for (i, field) in HslField::ALL.into_iter().enumerate() {
                let resp = ui
                    .add(egui::TextEdit::singleline(&mut self.hsl_fields[i]).desired_width(34.0))
                    .on_hover_text(field.label());
                if resp.lost_focus() {
                    let text = self.hsl_fields[i].clone();
                    let result = self.session.set_working_hsl_field(field, &text);
                    self.finish_edit(result);
                }
            }
        });

        ui.add_space(8.0);
        if ui.button("Add to New Palette…").clicked() {
            self.dialog = Some(Dialog::new(
                DialogKind::AddColorToNewPalette,
                swatch_core::session::WORKING_COLOR_NAME,
            ));
        }
        ui.menu_button("Copy…", |ui| {
            for format in ExportFormat::ALL {
                if ui.button(format.menu_label()).clicked() {
                    copy_text(ui, format.render(self.session.working()));
                    ui.close_menu();
                }
            }
        });
    }

    fn palette_section(&mut self, ui: &mut egui::Ui, palette: &swatch_core::Palette) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.strong(palette.name());
                ui.label(format!("({} colors)", palette.len()));
                if ui.button("Add Working Color").clicked() {
                    self.dialog = Some(Dialog::new(
                        DialogKind::AddColor {
                            palette: palette.id(),
                        },
                        "",
                    ));
                }
                if ui.button("Rename").clicked() {
                    self.dialog = Some(Dialog::new(
                        DialogKind::RenamePalette {
                            palette: palette.id(),
                        },
                        palette.name(),
                    ));
                }
                if ui.button("Delete").clicked() {
                    self.dialog = Some(Dialog::new(
                        DialogKind::DeletePalette {
                            palette: palette.id(),
                        },
                        palette.name(),
                    ));
                }
            });

            if palette.is_empty() {
                ui.weak("(empty)");
                return;
            }

            ui.horizontal_wrapped(|ui| {
                for entry in palette.entries() {
                    self.color_card(ui, palette.id(), entry);
                }
            });
        });
    }

    fn color_card(&mut self, ui: &mut egui::Ui, palette_id: usize, entry: &ColorEntry) {
        ui.group(|ui| {
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.strong(entry.name());
                    ui.menu_button("…", |ui| {
                        for format in ExportFormat::ALL {
                            if ui.button(format.menu_label()).clicked() {
                                copy_text(ui, format.render(entry));
                                ui.close_menu();
                            }
                        }
                        ui.separator();
                        if ui.button("Edit in Picker").clicked() {
                            self.session.pick(entry);
                            self.sync_fields();
                            ui.close_menu();
                        }
                        if ui.button("Rename Color").clicked() {
                            self.dialog = Some(Dialog::new(
                                DialogKind::RenameColor {
                                    palette: palette_id,
                                    color: entry.clone(),
                                },
                                entry.name(),
                            ));
                            ui.close_menu();
                        }
                        if ui.button("Delete Color").clicked() {
                            self.dialog = Some(Dialog::new(
                                DialogKind::DeleteColor {
                                    palette: palette_id,
                                    color: entry.clone(),
                                },
                                entry.name(),
                            ));
                            ui.close_menu();
                        }
                    });
                });

                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(90.0, 90.0), egui::Sense::hover());
                ui.painter().rect_filled(rect, 12.0, to_color32(entry.rgba()));

                let c = entry.rgba();
                let h = entry.hsl();
                ui.label(format!("HEX: #{}", entry.hex_string()));
                ui.label(format!("RGBA: ( {}, {}, {}, {} )", c.r, c.g, c.b, c.a));
                ui.label(format!(
                    "HSL: ( {}, {}, {} )",
                    h.hue(),
                    h.saturation(),
                    h.lightness()
                ));
            });
        });
    }

    fn run_dialog(
        &mut self,
        kind: DialogKind,
        name: String,
        palette_name: String,
    ) -> swatch_core::Result<()> {
        let session = &mut self.session;
        match kind {
            DialogKind::AddPalette => {
                session.add_default_palette(name);
                Ok(())
            }
            DialogKind::AddColorToNewPalette => {
                session.add_working_color_to_new_palette(name, palette_name);
                Ok(())
            }
            DialogKind::AddColor { palette } => session
                .add_working_color_to_palette(name, palette)
                .map(|_| ()),
            DialogKind::RenamePalette { palette } => session.store.rename_palette(name, palette),
            DialogKind::RenameColor { palette, color } => session
                .store
                .rename_color_in_palette(name, &color, palette),
            DialogKind::DeletePalette { palette } => {
                session.store.remove_palette(palette).map(|_| ())
            }
            DialogKind::DeleteColor { palette, color } => session
                .store
                .remove_color_from_palette(&color, palette)
                .map(|_| ()),
        }
    }

    fn show_dialog(&mut self, ctx: &egui::Context) {
        let Some(mut dialog) = self.dialog.take() else {
            return;
        };

        let mut confirmed = false;
        let mut cancelled = false;

        egui::Window::new(dialog.title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                if dialog.asks_for_name() {
                    ui.label("Name:");
                    let resp = ui.text_edit_singleline(&mut dialog.name);
                    if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        confirmed = true;
                    }
                    if matches!(dialog.kind, DialogKind::AddColorToNewPalette) {
                        ui.label("New palette:");
                        ui.text_edit_singleline(&mut dialog.palette_name);
                    }
                } else {
                    ui.label(format!(
                        "Are you sure you would like to delete '{}'?",
                        dialog.name
                    ));
                }

                ui.horizontal(|ui| {
                    let label = if dialog.asks_for_name() { "Save" } else { "Delete" };
                    if ui.button(label).clicked() {
                        confirmed = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });
            });

        if confirmed {
            let name = dialog.name.trim().to_string();
            let palette_name = dialog.palette_name.trim().to_string();
            let needs_palette_name = matches!(dialog.kind, DialogKind::AddColorToNewPalette);
            if dialog.asks_for_name()
                && (name.is_empty() || (needs_palette_name && palette_name.is_empty()))
            {
                self.last_error = Some("Name cannot be empty".to_string());
                self.dialog = Some(dialog);
                return;
            }
            let result = self.run_dialog(dialog.kind, name, palette_name);
            self.report(result);
        } else if !cancelled {
            self.dialog = Some(dialog);
        }
    }
}

fn to_color32(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

fn copy_text(ui: &egui::Ui, text: String) {
    ui.ctx().output_mut(|o| o.copied_text = text);
}

impl eframe::App for SwatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Swatch");
                ui.separator();
                ui.label(format!("File: {}", self.config.data_file.display()));
                ui.separator();
                if ui.button("New Palette").clicked() {
                    self.dialog = Some(Dialog::new(DialogKind::AddPalette, ""));
                }
            });

            if let Some(err) = &self.last_error {
                ui.colored_label(egui::Color32::RED, format!("Error: {err}"));
            }
        });

        egui::SidePanel::left("editor")
            .resizable(false)
            .show(ctx, |ui| self.editor_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.session.store.is_empty() {
                ui.label("(no palettes yet)");
                return;
            }

            // cloned so the cards can mutate the session while drawing
            let palettes = self.session.store.palettes().to_vec();
            egui::ScrollArea::vertical().show(ui, |ui| {
                for palette in &palettes {
                    self.palette_section(ui, palette);
                    ui.add_space(6.0);
                }
            });
        });

        self.show_dialog(ctx);
    }
}
