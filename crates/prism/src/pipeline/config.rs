use crate::config::Config;

pub struct PipelineConfig {
    /// Characters of document text sent to the classification step.
    pub classify_prefix_chars: usize,
}

impl PipelineConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            classify_prefix_chars: config.pipeline.classify_prefix_chars,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
