use std::time::Duration;

use eframe::egui;

use crate::sync::{ChatHandle, ChatSnapshot, Phase};

use super::components::{chat_area, header, input_bar};
use super::state::{ComposerView, LOADING};

/// Snapshots change from background tasks, so the window repaints on a timer.
const REPAINT_INTERVAL: Duration = Duration::from_millis(250);

pub struct ChatApp {
    handle: ChatHandle,
}

impl ChatApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, handle: ChatHandle) -> Self {
        Self { handle }
    }

    fn render_chat(&self, ctx: &egui::Context, snapshot: &ChatSnapshot) {
        let username = snapshot.session.username();

        egui::TopBottomPanel::top("chat_header").show(ctx, |ui| {
            header::render(ui, snapshot.feed.online_count, username);
        });

        egui::TopBottomPanel::bottom("composer").show(ctx, |ui| {
            ui.add_space(4.0);
            let view = ComposerView::from_state(&snapshot.composer);
            let actions = input_bar::render(ui, &snapshot.composer.draft, &view);
            if let Some(text) = actions.edited {
                self.handle.edit_draft(text);
            }
            if actions.submit && !self.handle.submit() {
                log::debug!("Submit ignored: draft not sendable");
            }
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            chat_area::render(ui, &snapshot.feed.messages, username);
        });
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let snapshot = self.handle.snapshot();

        match &snapshot.phase {
            Phase::Ready => self.render_chat(ctx, &snapshot),
            Phase::Failed(message) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.colored_label(egui::Color32::RED, message.as_str());
                    });
                });
            }
            Phase::Idle | Phase::Initializing | Phase::Disposed => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(LOADING);
                    });
                });
            }
        }

        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}
