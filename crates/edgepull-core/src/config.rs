//! Per-edge configuration.
//!
//! Defaults mirror a stock pull-to-refresh scroll view: a 40px indicator on
//! each edge, release-to-trigger, haptics on, refresh enabled and load more
//! disabled.

use crate::edge::{Edge, TriggerBehavior};
use crate::error::PullError;

/// Configuration for a single edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeConfig {
    /// Whether pulls past this edge are tracked at all.
    pub enabled: bool,
    /// Resting height of the indicator element. Also the inset kept while busy.
    pub element_height: f32,
    /// Pull distance that counts as a full pull. `None` uses `element_height`.
    pub trigger_height: Option<f32>,
    pub trigger_behavior: TriggerBehavior,
    /// Pulse the haptic performer when the pull crosses the trigger height.
    pub haptics_enabled: bool,
}

impl EdgeConfig {
    pub const DEFAULT_ELEMENT_HEIGHT: f32 = 40.0;

    /// Default configuration for the top (refresh) edge.
    pub fn refresh() -> Self {
        Self {
            enabled: true,
            element_height: Self::DEFAULT_ELEMENT_HEIGHT,
            trigger_height: None,
            trigger_behavior: TriggerBehavior::OverThreshold,
            haptics_enabled: true,
        }
    }

    /// Default configuration for the bottom (load more) edge. Disabled until
    /// the host opts in.
    pub fn load() -> Self {
        Self {
            enabled: false,
            ..Self::refresh()
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_element_height(mut self, height: f32) -> Self {
        self.element_height = height;
        self
    }

    pub fn with_trigger_height(mut self, height: f32) -> Self {
        self.trigger_height = Some(height);
        self
    }

    pub fn with_trigger_behavior(mut self, behavior: TriggerBehavior) -> Self {
        self.trigger_behavior = behavior;
        self
    }

    pub fn with_haptics(mut self, enabled: bool) -> Self {
        self.haptics_enabled = enabled;
        self
    }

    /// The pull distance that maps to a progress of 1.0.
    pub fn trigger_height(&self) -> f32 {
        self.trigger_height.unwrap_or(self.element_height)
    }

    /// Rejects negative or non-finite heights. A zero height is accepted and
    /// simply makes the edge unpullable.
    pub fn validate(&self, edge: Edge) -> Result<(), PullError> {
        check_height(edge, "element height", self.element_height)?;
        if let Some(height) = self.trigger_height {
            check_height(edge, "trigger height", height)?;
        }
        Ok(())
    }
}

fn check_height(edge: Edge, field: &'static str, value: f32) -> Result<(), PullError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PullError::InvalidConfig { edge, field, value })
    }
}

/// Configuration for both edges of a scroll view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PullConfig {
    pub top: EdgeConfig,
    pub bottom: EdgeConfig,
}

impl PullConfig {
    pub fn with_top(mut self, config: EdgeConfig) -> Self {
        self.top = config;
        self
    }

    pub fn with_bottom(mut self, config: EdgeConfig) -> Self {
        self.bottom = config;
        self
    }

    pub fn edge(&self, edge: Edge) -> &EdgeConfig {
        match edge {
            Edge::Top => &self.top,
            Edge::Bottom => &self.bottom,
        }
    }

    pub fn validate(&self) -> Result<(), PullError> {
        self.top.validate(Edge::Top)?;
        self.bottom.validate(Edge::Bottom)
    }
}

impl Default for PullConfig {
    fn default() -> Self {
        Self {
            top: EdgeConfig::refresh(),
            bottom: EdgeConfig::load(),
        }
    }
}
