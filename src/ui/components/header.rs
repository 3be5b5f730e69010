use eframe::egui;

use crate::ui::state::{TITLE, online_label};

pub fn render(ui: &mut egui::Ui, online_count: u32, username: Option<&str>) {
    ui.horizontal(|ui| {
        ui.heading(TITLE);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(username) = username {
                ui.label(egui::RichText::new(username).strong());
                ui.label("Вы:");
                ui.separator();
            }
            ui.label(online_label(online_count));
            // Hiển thị trạng thái online với màu xanh
            ui.colored_label(egui::Color32::GREEN, "●");
        });
    });
}
