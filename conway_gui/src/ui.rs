// ui.rs - Controls and grid painting for the viewer

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use std::time::Instant;

use conway::Viewport;
use conway::patterns::PATTERNS;

use crate::{LifeApp, should_apply_resolution};

impl LifeApp {
    fn controls(&mut self, ui: &mut egui::Ui, now: Instant) {
        let running = self.driver.life().is_running();

        ui.horizontal(|ui| {
            if ui.add_enabled(!running, egui::Button::new("▶ Start")).clicked() {
                self.driver.start(now);
            }
            if ui.add_enabled(running, egui::Button::new("⏸ Stop")).clicked() {
                self.driver.stop();
            }
            if ui.add_enabled(!running, egui::Button::new("Step")).clicked() {
                self.driver.life_mut().step();
            }
            if ui.button("⏹ Clear").clicked() {
                self.driver.life_mut().clear();
            }
            if ui.button("🎲 Random").clicked() {
                self.driver.life_mut().randomize();
            }

            ui.separator();

            // Pattern dropdown
            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });
            if ui.button("Apply Pattern").clicked() {
                let name = PATTERNS[self.selected_pattern].name;
                if self.driver.settle_pending() {
                    // The settle reflow would wipe it; let it place the pattern.
                    self.driver.life_mut().queue_pattern(name);
                } else {
                    self.driver.life_mut().place_pattern(name);
                }
            }
        });

        ui.horizontal(|ui| {
            ui.label("Interval (ms):");
            let interval = ui.add(egui::TextEdit::singleline(&mut self.interval_text).desired_width(60.0));
            if interval.lost_focus() {
                let text = self.interval_text.clone();
                self.driver.life_mut().set_interval_text(&text, now);
                self.interval_text = self.driver.life().interval().as_millis().to_string();
            }

            ui.separator();

            ui.label("Resolution:");
            if ui.button("−").clicked() {
                let result = self.driver.life_mut().shrink_resolution();
                self.report(result);
                self.sync_resolution_text();
            }
            let resolution = ui.add(egui::TextEdit::singleline(&mut self.resolution_text).desired_width(80.0));
            // Enter and blur both count; a single-line edit loses focus on Enter.
            if resolution.lost_focus() {
                if should_apply_resolution(&self.resolution_text, &self.current_resolution()) {
                    let text = self.resolution_text.clone();
                    let result = self.driver.life_mut().apply_resolution_text(&text).map(|_| ());
                    self.report(result);
                }
                self.sync_resolution_text();
            }
            if ui.button("+").clicked() {
                let result = self.driver.life_mut().grow_resolution();
                self.report(result);
                self.sync_resolution_text();
            }
            if ui
                .add_enabled(self.driver.life().desired_resolution().is_some(), egui::Button::new("Auto"))
                .clicked()
            {
                let result = self.driver.life_mut().clear_resolution();
                self.report(result);
                self.sync_resolution_text();
            }

            ui.separator();

            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
        });

        ui.horizontal(|ui| {
            let life = self.driver.life();
            ui.label(format!("Generation: {}", life.generation()));
            ui.label(format!("Live cells: {}", life.population()));
            if life.cycle_detected() {
                ui.label("(cycle)");
            }
            if let Some(notice) = &self.notice {
                ui.separator();
                ui.colored_label(Color32::from_rgb(200, 120, 0), notice.as_str());
            }
        });
    }

    fn draw_grid(&mut self, ui: &mut egui::Ui) {
        let spec = self.driver.life().spec();
        let cell = spec.cell_size as f32;
        let natural = Vec2::new(spec.columns as f32 * cell, spec.rows as f32 * cell);
        let available = ui.available_size();

        // Never upscale; shrink to fit unless the width takes priority.
        let scale_x = available.x / natural.x;
        let scale_y = available.y / natural.y;
        let scale = if spec.width_priority {
            scale_x.min(1.0)
        } else {
            scale_x.min(scale_y).min(1.0)
        };
        let box_size = cell * scale;

        let (response, painter) = ui.allocate_painter(natural * scale, egui::Sense::click());
        let origin = response.rect.min;
        painter.rect_filled(response.rect, 0.0, self.dead_color);

        let grid = self.driver.life().grid();
        for (y, row) in grid.rows().enumerate() {
            for (x, &alive) in row.iter().enumerate() {
                let rect = Rect::from_min_size(
                    origin + Vec2::new(x as f32 * box_size, y as f32 * box_size),
                    Vec2::splat(box_size),
                );
                if alive {
                    painter.rect_filled(rect, 0.0, self.live_color);
                }
                if box_size >= 6.0 {
                    // Draw subtle border
                    painter.rect_stroke(rect, 0.0, Stroke::new(0.2, Color32::from_gray(180)));
                }
            }
        }

        // Toggling is ignored by the engine while running.
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let x = ((pos.x - origin.x) / box_size) as usize;
                let y = ((pos.y - origin.y) / box_size) as usize;
                if x < spec.columns && y < spec.rows {
                    let result = self.driver.life_mut().toggle(x, y).map(|_| ());
                    self.report(result);
                }
            }
        }
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        match self.driver.poll(now) {
            Ok(tick) if tick.settled => self.sync_resolution_text(),
            Ok(_) => {}
            Err(e) => self.report(Err(e)),
        }
        if let Some(notice) = self.driver.life_mut().take_notice() {
            self.notice = Some(notice);
        }

        let panel = egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.heading("Conway's Game of Life");
            self.controls(ui, now);
        });

        let screen = ctx.screen_rect();
        let viewport = Viewport::new(
            screen.width() as f64,
            screen.height() as f64,
            panel.response.rect.height() as f64,
        );
        self.observe_viewport(viewport, now);

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.driver.life().width_priority() {
                egui::ScrollArea::vertical().show(ui, |ui| self.draw_grid(ui));
            } else {
                self.draw_grid(ui);
            }
        });

        // Wake up for the next step or settle.
        if let Some(deadline) = self.driver.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }
}
