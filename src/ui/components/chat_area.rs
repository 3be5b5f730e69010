use eframe::egui;

use crate::common::Message;
use crate::ui::state::{NO_MESSAGES, format_local_timestamp, is_own_message};

pub fn render(ui: &mut egui::Ui, messages: &[Message], username: Option<&str>) {
    egui::ScrollArea::vertical()
        .stick_to_bottom(true)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if messages.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new(NO_MESSAGES).weak());
                });
                return;
            }

            for message in messages {
                let own = is_own_message(message, username);
                let fill = if own {
                    ui.visuals().selection.bg_fill.linear_multiply(0.3)
                } else {
                    ui.visuals().faint_bg_color
                };

                egui::Frame::group(ui.style()).fill(fill).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(message.username.as_str()).strong());
                        ui.label(
                            egui::RichText::new(format_local_timestamp(&message.timestamp))
                                .small()
                                .weak(),
                        );
                    });
                    ui.label(message.message_text.as_str());
                });
                ui.add_space(4.0);
            }
        });
}
