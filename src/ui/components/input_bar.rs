use eframe::egui;

use crate::ui::state::{ComposerView, INPUT_HINT};

#[derive(Default)]
pub struct InputActions {
    /// New draft text when the user typed this frame.
    pub edited: Option<String>,
    pub submit: bool,
}

pub fn render(ui: &mut egui::Ui, draft: &str, view: &ComposerView) -> InputActions {
    let mut actions = InputActions::default();

    if let Some(error) = &view.error {
        ui.colored_label(egui::Color32::RED, error.as_str());
    }

    let mut text = draft.to_string();
    let response = ui.add_enabled(
        view.input_enabled,
        egui::TextEdit::multiline(&mut text)
            .hint_text(INPUT_HINT)
            .desired_rows(3)
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        actions.edited = Some(text);
    }

    ui.horizontal(|ui| {
        let counter = egui::RichText::new(view.counter.as_str()).small();
        if view.over_limit {
            ui.label(counter.color(egui::Color32::RED));
        } else {
            ui.label(counter.weak());
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let clicked = ui
                .add_enabled(view.send_enabled, egui::Button::new(view.send_label))
                .clicked();
            // Ctrl+Enter gửi nhanh
            let shortcut = response.has_focus()
                && ui.input(|i| i.key_pressed(egui::Key::Enter) && i.modifiers.ctrl);
            actions.submit = view.send_enabled && (clicked || shortcut);
        });
    });

    actions
}
