// MIT License - Copyright (c) 2026 Peter Wright

use crate::constants::DEFAULT_CAT_CONFIDENCE_THRESHOLD;

/// Tunables for [`crate::SecurityService`].
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityConfig {
    /// Confidence a classifier must reach for a frame to count as a cat (default: 0.5)
    pub cat_confidence_threshold: f32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            cat_confidence_threshold: DEFAULT_CAT_CONFIDENCE_THRESHOLD,
        }
    }
}

impl SecurityConfig {
    /// Create a new config builder starting from defaults.
    pub fn builder() -> SecurityConfigBuilder {
        SecurityConfigBuilder::default()
    }
}

/// Builder for SecurityConfig.
#[derive(Debug, Clone, Default)]
pub struct SecurityConfigBuilder {
    config: SecurityConfig,
}

impl SecurityConfigBuilder {
    pub fn cat_confidence_threshold(mut self, threshold: f32) -> Self {
        self.config.cat_confidence_threshold = threshold;
        self
    }

    pub fn build(self) -> SecurityConfig {
        self.config
    }
}
