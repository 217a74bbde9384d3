use std::net::SocketAddr;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use eframe::egui;

use wordcloud3d::config::{AnalysisConfig, ServerConfig, ViewerConfig, DEFAULT_ENDPOINT};
use wordcloud3d::engine::AnalysisEngine;
use wordcloud3d::server::AnalysisServer;

mod app;

use app::WordCloudApp;

#[derive(Parser)]
#[command(name = "wordcloud3d", version, about = "News-article keywords as a 3D word cloud")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the 3D viewer (default)
    View(ViewArgs),
    /// Run the keyword analysis HTTP service
    Serve {
        #[arg(long, default_value = "127.0.0.1:8000")]
        bind: SocketAddr,
        /// Allowed CORS origin, repeatable
        #[arg(long = "origin")]
        origins: Vec<String>,
        #[arg(long, default_value_t = 60)]
        top_k: usize,
    },
    /// Analyse one URL and print the keywords as JSON
    Analyze {
        url: String,
        #[arg(long, default_value_t = 60)]
        top_k: usize,
    },
}

#[derive(clap::Args)]
struct ViewArgs {
    /// Analysis service endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
    /// Run the pipeline in-process instead of calling the service
    #[arg(long)]
    local: bool,
    /// Keep the starfield fixed instead of following the camera
    #[arg(
        long,
        default_value_t = true,
        num_args = 0..=1,
        default_missing_value = "true",
        action = clap::ArgAction::Set
    )]
    static_background: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or_else(|| {
        Command::View(ViewArgs {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            local: false,
            static_background: true,
        })
    });

    match command {
        Command::View(args) => run_viewer(args),
        Command::Serve { bind, origins, top_k } => {
            let mut config = ServerConfig {
                bind,
                ..Default::default()
            };
            if !origins.is_empty() {
                config.allowed_origins = origins;
            }
            config.analysis.top_k = top_k;
            run_server(config)
        }
        Command::Analyze { url, top_k } => run_analyze(&url, top_k),
    }
}

fn run_viewer(args: ViewArgs) -> ExitCode {
    let config = ViewerConfig {
        endpoint: args.endpoint,
        local: args.local,
        static_background: args.static_background,
        ..Default::default()
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("3D Word Cloud"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "3D Word Cloud",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(WordCloudApp::new(config)?))
        }),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("viewer failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_server(config: ServerConfig) -> ExitCode {
    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(async move {
        let server = match AnalysisServer::start(config).await {
            Ok(server) => server,
            Err(e) => {
                log::error!("failed to bind: {}", e);
                return ExitCode::FAILURE;
            }
        };

        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("signal handler failed: {}", e);
        }
        log::info!("shutting down");
        server.stop().await;
        ExitCode::SUCCESS
    })
}

fn run_analyze(url: &str, top_k: usize) -> ExitCode {
    let engine = AnalysisEngine::new(AnalysisConfig {
        top_k,
        ..Default::default()
    });

    match engine.analyze_url(url) {
        Ok(result) => match serde_json::to_string_pretty(&result) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("{}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            log::error!("{} ({})", e, e.phase.as_str());
            ExitCode::FAILURE
        }
    }
}
