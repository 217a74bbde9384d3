//! Toolbar rendering for `WordCloudApp`.
//!
//! Draws the title, the URL field with paste and Go buttons, the sample-link
//! selector, and the inline error message.

use eframe::egui;

use wordcloud3d::session::SAMPLE_LINKS;

use super::{WordCloudApp, ACCENT, ERROR_TEXT};

const FIELD_TEXT: egui::Color32 = egui::Color32::from_rgb(0xcf, 0xe6, 0xff);

impl WordCloudApp {
    /// Render the top control strip.
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new("3D Word Cloud")
                    .color(ACCENT)
                    .size(24.0)
                    .strong(),
            );
        });
        ui.add_space(6.0);

        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new("Enter news article URL:").color(ACCENT).strong());

            let response = ui.add_sized(
                [256.0, 24.0],
                egui::TextEdit::singleline(&mut self.session.url_input)
                    .hint_text("https://example.com/article")
                    .text_color(FIELD_TEXT),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.submit(ctx);
            }

            if ui
                .button("\u{1F4CB}")
                .on_hover_text("Paste from clipboard")
                .clicked()
            {
                self.session.paste(&mut self.clipboard);
            }

            let label = if self.session.loading { "Analyzing…" } else { "Go" };
            if ui
                .add_enabled(
                    !self.session.loading,
                    egui::Button::new(egui::RichText::new(label).strong())
                        .min_size(egui::vec2(48.0, 24.0)),
                )
                .clicked()
            {
                self.submit(ctx);
            }

            egui::ComboBox::from_id_salt("sample_links")
                .selected_text(
                    SAMPLE_LINKS
                        .iter()
                        .find(|(_, url)| *url == self.session.url_input)
                        .map(|(label, _)| *label)
                        .unwrap_or("Sample Links"),
                )
                .show_ui(ui, |ui| {
                    for (label, url) in SAMPLE_LINKS {
                        let selected = self.session.url_input == *url;
                        if ui.selectable_label(selected, *label).clicked() {
                            self.session.url_input = url.to_string();
                        }
                    }
                });

            if let Some(err) = &self.session.error {
                ui.colored_label(ERROR_TEXT, err.as_str());
            }
        });
    }
}
