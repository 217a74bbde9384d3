//! Analysis lifecycle for `WordCloudApp`.
//!
//! `submit` hands the URL to the session's worker thread; `check_analysis`
//! runs once per frame and rebuilds the cloud when new keywords land.

use std::sync::Arc;

use eframe::egui;

use wordcloud3d::render::cloud::CloudScene;

use super::WordCloudApp;

impl WordCloudApp {
    /// Start analysing the URL field. No-op while a request is in flight.
    pub fn submit(&mut self, ctx: &egui::Context) {
        let ctx = ctx.clone();
        let started = self
            .session
            .submit(Arc::clone(&self.analyzer), move || ctx.request_repaint());
        if started {
            log::info!("analyzing {}", self.session.url_input.trim());
        }
    }

    /// Poll the in-flight request and rebuild the scene on success.
    pub fn check_analysis(&mut self) {
        self.session.poll();
        if self.session.revision() != self.scene_revision {
            self.scene = CloudScene::new(&self.session.keywords);
            self.scene_revision = self.session.revision();
            self.hovered = None;
        }
    }
}
