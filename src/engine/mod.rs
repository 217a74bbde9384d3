pub mod pipeline;

pub use pipeline::{AnalysisEngine, AnalysisResult, LocalAnalyzer, Phase, PipelineError};
