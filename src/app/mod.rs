use eframe::egui::{self, Context, Sense};
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::BackdropSettings;
use crate::field::{SimulationField, SurfaceBounds, TickStats};

mod input;
mod overlay;
mod painter;
mod scheduler;

use input::{Shortcut, apply_pointer_events, shortcuts, sync_viewport};
use overlay::StatsOverlay;
use painter::PainterSurface;
use scheduler::{FrameScheduler, StopToken};

pub struct LaunchOptions {
    pub settings: BackdropSettings,
    pub seed: Option<u64>,
    pub frame_limit: Option<u64>,
    pub show_stats: bool,
}

pub struct BackdropApp {
    settings: BackdropSettings,
    seed: Option<u64>,
    state: AppState,
    scheduler: FrameScheduler,
    stop: StopToken,
    overlay: StatsOverlay,
    last_stats: TickStats,
}

enum AppState {
    /// The first frames can report a zero-sized panel; points are only
    /// placed once the surface has real bounds.
    WaitingForSurface,
    Running(Box<SimulationField>),
}

impl BackdropApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, options: LaunchOptions) -> Self {
        let scheduler = FrameScheduler::new(options.frame_limit);
        let stop = scheduler.stop_token();
        Self {
            settings: options.settings,
            seed: options.seed,
            state: AppState::WaitingForSurface,
            scheduler,
            stop,
            overlay: StatsOverlay::new(options.show_stats),
            last_stats: TickStats::default(),
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn try_start(&mut self, rect: egui::Rect) {
        let mut field = SimulationField::new(self.settings.field.clone(), SurfaceBounds::default());
        sync_viewport(&mut field, rect);

        let mut rng = self.rng();
        match field.initialize(self.settings.field.point_count, &mut rng) {
            Ok(()) => self.state = AppState::Running(Box::new(field)),
            Err(error) => debug!("backdrop not started yet: {error:#}"),
        }
    }

    fn handle_shortcuts(&mut self, ctx: &Context) {
        let pressed = ctx.input(|input| shortcuts(&input.events));
        for shortcut in pressed {
            match shortcut {
                Shortcut::ToggleStats => self.overlay.visible = !self.overlay.visible,
                Shortcut::Stop => self.stop_animation("escape pressed"),
            }
        }

        if ctx.input(|input| input.viewport().close_requested()) {
            self.stop_animation("window closing");
        }
    }

    fn stop_animation(&self, reason: &str) {
        if !self.stop.is_stopped() {
            info!(
                "stopping animation after {} frames ({reason})",
                self.scheduler.frames()
            );
            self.stop.stop();
        }
    }
}

impl eframe::App for BackdropApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.overlay
            .record_frame(ctx.input(|input| input.stable_dt));
        self.handle_shortcuts(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (rect, _response) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
                let painter = ui.painter_at(rect);

                if matches!(self.state, AppState::WaitingForSurface) {
                    self.try_start(rect);
                }

                let AppState::Running(field) = &mut self.state else {
                    painter.rect_filled(rect, 0.0, self.settings.background);
                    ctx.request_repaint();
                    return;
                };

                let field = field.as_mut();
                sync_viewport(field, rect);
                let events = ctx.input(|input| input.events.clone());
                apply_pointer_events(field, &events, rect);

                let mut surface = PainterSurface::new(&painter, rect, self.settings.background);
                self.last_stats = match self.scheduler.run(field, &mut surface, ctx) {
                    Some(stats) => stats,
                    None => field.render_frozen(&mut surface),
                };

                self.overlay.draw(
                    &painter,
                    rect,
                    self.last_stats,
                    self.scheduler.frames(),
                    self.scheduler.is_stopped(),
                );
            });
    }
}
