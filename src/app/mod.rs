//! `WordCloudApp`: the top-level egui application state.
//!
//! This module declares the `WordCloudApp` struct and its constructor.
//! Methods are split across the sibling sub-modules:
//!
//! - `request`: analysis submit / poll lifecycle
//! - `toolbar`: title, URL field and controls
//! - `content`: the 3-D viewport (starfield, connectors, words)

pub mod content;
pub mod request;
pub mod toolbar;

use std::sync::Arc;

use eframe::egui;

use wordcloud3d::clipboard::SystemClipboard;
use wordcloud3d::config::ViewerConfig;
use wordcloud3d::engine::LocalAnalyzer;
use wordcloud3d::net::analyze::{AnalyzeError, Analyzer, HttpAnalyzer};
use wordcloud3d::render::camera::OrbitCamera;
use wordcloud3d::render::cloud::CloudScene;
use wordcloud3d::render::galaxy::Galaxy;
use wordcloud3d::render::BackgroundMode;
use wordcloud3d::session::AnalysisSession;

const GALAXY_SEED: u64 = 0x5EED_0F_57A25;

pub const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0x0a, 0x0a, 0x1a);
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0xab, 0xf5, 0xfc);
pub const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(0xff, 0x9a, 0xa2);

// ─── Application state ───────────────────────────────────────────────────────

pub struct WordCloudApp {
    pub session: AnalysisSession,
    pub analyzer: Arc<dyn Analyzer>,
    pub clipboard: SystemClipboard,
    pub scene: CloudScene,
    /// Session revision the scene was built from
    pub scene_revision: u64,
    pub camera: OrbitCamera,
    pub galaxy: Galaxy,
    pub background: BackgroundMode,
    /// Word under the pointer last frame, index into `scene.words`
    pub hovered: Option<usize>,
    pub app_start: std::time::Instant,
}

impl WordCloudApp {
    pub fn new(config: ViewerConfig) -> Result<Self, AnalyzeError> {
        let analyzer: Arc<dyn Analyzer> = if config.local {
            log::info!("analysing in-process");
            Arc::new(LocalAnalyzer::new(config.analysis.clone()))
        } else {
            log::info!("analysis endpoint: {}", config.endpoint);
            Arc::new(HttpAnalyzer::new(config.endpoint.clone())?)
        };

        Ok(Self {
            session: AnalysisSession::new(),
            analyzer,
            clipboard: SystemClipboard::new(),
            scene: CloudScene::default(),
            scene_revision: 0,
            camera: OrbitCamera::default(),
            galaxy: Galaxy::generate(GALAXY_SEED),
            background: BackgroundMode::from_static_flag(config.static_background),
            hovered: None,
            app_start: std::time::Instant::now(),
        })
    }
}

impl eframe::App for WordCloudApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_analysis();

        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::none()
                    .fill(egui::Color32::from_rgb(0x37, 0x41, 0x51))
                    .inner_margin(egui::Margin::symmetric(16.0, 10.0)),
            )
            .show(ctx, |ui| {
                self.draw_toolbar(ui, ctx);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(BACKGROUND))
            .show(ctx, |ui| {
                self.draw_content(ui);
            });

        // Float and hover easing run every frame
        ctx.request_repaint();
    }
}
