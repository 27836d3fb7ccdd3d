/*
 * UI Module
 *
 * This module builds the egui overlay drawn over the particle field: the
 * profile card with its social links and music toggle, and the optional debug
 * panel with live tuning controls.
 */

use nannou_egui::{egui, Egui};

use crate::audio::AudioToggle;
use crate::debug::DebugInfo;
use crate::params::{ConnectionStrategy, FieldParams};
use crate::profile::ProfileView;

/// What the user asked for through the overlay this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiActions {
    pub toggle_audio: bool,
}

pub struct DebugControls<'a> {
    pub params: &'a mut FieldParams,
    pub info: &'a DebugInfo,
    pub paused: &'a mut bool,
}

pub fn update_ui(
    egui: &mut Egui,
    profile: &ProfileView,
    audio: &AudioToggle,
    debug: Option<DebugControls<'_>>,
) -> UiActions {
    let mut actions = UiActions::default();
    let ctx = egui.begin_frame();

    egui::Window::new("Profile")
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(&ctx, |ui| {
            ui.vertical_centered(|ui| {
                // Remote images are not fetched; the avatar is offered as a link
                ui.hyperlink_to(profile.avatar.alt.as_str(), profile.avatar.src.as_str());
                ui.heading(profile.name.as_str());
                ui.label(profile.subtitle.as_str());

                ui.separator();

                ui.horizontal_wrapped(|ui| {
                    for link in profile.visible_links() {
                        if let Some(href) = &link.href {
                            ui.hyperlink_to(link.channel.label(), href.as_str());
                        }
                    }
                });

                if profile.has_music() {
                    ui.separator();
                    let label = if audio.is_playing() { "❚❚ Pause music" } else { "▶ Play music" };
                    if ui.button(label).clicked() {
                        actions.toggle_audio = true;
                    }
                }
            });
        });

    if let Some(debug) = debug {
        egui::Window::new("Field Debug")
            .default_pos([10.0, 10.0])
            .show(&ctx, |ui| {
                for line in debug.info.lines() {
                    ui.label(line);
                }

                ui.separator();

                ui.label("Link search");
                ui.radio_value(
                    &mut debug.params.connection_strategy,
                    ConnectionStrategy::BruteForce,
                    "Brute force",
                );
                ui.radio_value(
                    &mut debug.params.connection_strategy,
                    ConnectionStrategy::SpatialGrid,
                    "Spatial grid",
                );

                ui.add(
                    egui::Slider::new(
                        &mut debug.params.connection_distance,
                        FieldParams::get_connection_distance_range(),
                    )
                    .text("Link distance"),
                );
                ui.add(
                    egui::Slider::new(&mut debug.params.max_line_alpha, FieldParams::get_line_alpha_range())
                        .text("Max link alpha"),
                );
                ui.add(
                    egui::Slider::new(&mut debug.params.pointer_smoothing, FieldParams::get_smoothing_range())
                        .text("Pointer smoothing"),
                );

                ui.checkbox(&mut *debug.paused, "Pause Simulation");
            });
    }

    actions
}
