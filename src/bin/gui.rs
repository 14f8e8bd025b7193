//! Graphical User Interface for arruma
//!
//! This provides the dialog layout of the organization modal using
//! eframe/egui: a launcher panel to pick a process, and a centered modal
//! window animating the simulated steps.
//!
//! # Architecture
//!
//! This is a thin wrapper around the core `arruma` library. It uses
//! `eframe` for rendering and handles all GUI-specific logic; the sequencer
//! is polled with `Instant::now()` on every frame.

use arruma::{ProcessType, Sequencer};
use eframe::egui;
use std::{env, time::Instant};
use tracing_subscriber::EnvFilter;

/// Spinner frames for the active step animation
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

// ============================================================================
// APPLICATION STATE
// ============================================================================

struct ArrumaApp {
    sequencer: Sequencer,
    selected: ProcessType,
}

impl ArrumaApp {
    fn new(process: ProcessType) -> Self {
        Self {
            sequencer: Sequencer::new(process),
            selected: process,
        }
    }
}

impl eframe::App for ArrumaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Request repaint so the step animation keeps moving
        ctx.request_repaint();

        // Advance the sequence if its deadline elapsed
        self.sequencer.poll(Instant::now());

        // Track user actions to apply after rendering
        let mut should_open = false;
        let mut should_close = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("🗂 arruma");
            ui.label(format!("v{}", env!("CARGO_PKG_VERSION")));
            ui.add_space(10.0);

            ui.label(egui::RichText::new("O que você quer organizar?").strong());
            ui.add_space(5.0);

            for process in ProcessType::ALL {
                let config = process.config();
                let checked = self.selected == process;
                let label = format!("{} {}", config.icon, config.title);

                if ui.selectable_label(checked, label).clicked() {
                    self.selected = process;
                }
                ui.label(
                    egui::RichText::new(config.subtitle)
                        .small()
                        .color(egui::Color32::GRAY),
                );
                ui.add_space(4.0);
            }

            ui.add_space(10.0);

            let organize = egui::Button::new("Organizar");
            if ui.add_enabled(!self.sequencer.is_open(), organize).clicked() {
                should_open = true;
            }
        });

        // Apply launcher actions after releasing the panel
        if should_open {
            let now = Instant::now();
            self.sequencer.set_process(self.selected, now);
            self.sequencer.open_at(now);
        }

        // Modal dialog
        if self.sequencer.is_open() {
            let seq = &self.sequencer;
            let config = seq.config();
            let accent =
                egui::Color32::from_rgb(config.accent.0, config.accent.1, config.accent.2);

            egui::Window::new(format!("{} {}", config.icon, config.title))
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(egui::RichText::new(config.subtitle).color(egui::Color32::GRAY));
                    ui.add_space(8.0);

                    if seq.is_complete() {
                        let stat = seq.process().result_stat();
                        ui.label(
                            egui::RichText::new("✓ Concluído")
                                .color(egui::Color32::from_rgb(34, 197, 94))
                                .strong(),
                        );
                        ui.add_space(4.0);
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(stat.value)
                                    .heading()
                                    .color(accent)
                                    .strong(),
                            );
                            ui.label(stat.label);
                        });
                    } else {
                        let spin =
                            (ctx.input(|i| i.time) * 10.0) as usize % SPINNER_FRAMES.len();
                        for (index, step) in config.steps.iter().enumerate() {
                            let (marker, color) = if index < seq.current_step() {
                                ("✓", egui::Color32::from_rgb(34, 197, 94))
                            } else if index == seq.current_step() {
                                (SPINNER_FRAMES[spin], accent)
                            } else {
                                ("○", egui::Color32::GRAY)
                            };
                            let icon = step.icon.unwrap_or("•");
                            ui.label(
                                egui::RichText::new(format!(
                                    "{} {} {}",
                                    marker, icon, step.label
                                ))
                                .color(color),
                            );
                        }
                    }

                    ui.add_space(8.0);
                    let bar = egui::ProgressBar::new(seq.fraction())
                        .desired_width(260.0)
                        .animate(true)
                        .text(format!("{}%", seq.percent()));
                    ui.add(bar);
                    ui.add_space(8.0);

                    let label = if seq.is_complete() { "Fechar" } else { "Cancelar" };
                    if ui.button(label).clicked() {
                        should_close = true;
                    }
                });
        }

        // Dismissing always resets the sequence, finished or not
        if should_close {
            self.sequencer.close();
        }
    }
}

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let process = match args.get(1) {
        Some(key) => ProcessType::from_key(key).unwrap_or_else(|| {
            tracing::warn!(key = key.as_str(), "unknown process key, using default");
            ProcessType::Screenshots
        }),
        None => ProcessType::Screenshots,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 560.0])
            .with_min_inner_size([360.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "arruma",
        options,
        Box::new(|_cc| Ok(Box::new(ArrumaApp::new(process)))),
    )
}
