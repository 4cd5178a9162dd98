use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use eframe::egui::Context;
use log::info;

use crate::field::{DrawSurface, SimulationField, TickStats};

/// Display-synchronized "call me again" primitive.
pub(in crate::app) trait FrameHost {
    fn request_frame(&self);
}

impl FrameHost for Context {
    fn request_frame(&self) {
        self.request_repaint();
    }
}

#[derive(Clone, Debug, Default)]
pub(in crate::app) struct StopToken(Arc<AtomicBool>);

impl StopToken {
    pub(in crate::app) fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub(in crate::app) fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Ticks the field once per host frame and re-arms until stopped.
pub(in crate::app) struct FrameScheduler {
    stop: StopToken,
    frames: u64,
    frame_limit: Option<u64>,
}

impl FrameScheduler {
    pub(in crate::app) fn new(frame_limit: Option<u64>) -> Self {
        Self {
            stop: StopToken::default(),
            frames: 0,
            frame_limit,
        }
    }

    pub(in crate::app) fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    pub(in crate::app) fn frames(&self) -> u64 {
        self.frames
    }

    pub(in crate::app) fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    pub(in crate::app) fn run(
        &mut self,
        field: &mut SimulationField,
        surface: &mut dyn DrawSurface,
        host: &impl FrameHost,
    ) -> Option<TickStats> {
        if self.frame_limit.is_some_and(|limit| self.frames >= limit) {
            self.stop.stop();
        }
        if self.stop.is_stopped() {
            return None;
        }

        let stats = field.tick(surface);
        self.frames += 1;

        if self
            .frame_limit
            .is_some_and(|limit| self.frames >= limit)
        {
            info!("frame limit of {} reached, stopping animation", self.frames);
            self.stop.stop();
        }

        if !self.stop.is_stopped() {
            host.request_frame();
        }

        Some(stats)
    }
}
