//! Configuration types for Transit translation.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources such as a TOML file. Every field has a default, so an
//! empty document yields [`AppConfig::default`].
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and validation settings.
//! - [`LayoutConfig`] - Grid constants used when placing diagram shapes.
//! - [`ValidationConfig`] - How strictly model references are checked.
//!
//! # Example
//!
//! ```
//! # use transit::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().origin_x(), 100.0);
//! assert!(!config.validation().strict_references());
//! ```

use serde::Deserialize;

use transit_parser::ValidateConfig;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Validation configuration section.
    #[serde(default)]
    validation: ValidationConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    ///
    /// # Arguments
    ///
    /// * `layout` - Diagram grid settings.
    /// * `validation` - Model validation settings.
    pub fn new(layout: LayoutConfig, validation: ValidationConfig) -> Self {
        Self { layout, validation }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the validation configuration.
    pub fn validation(&self) -> &ValidationConfig {
        &self.validation
    }
}

/// Grid constants for the diagram layout.
///
/// Shapes are placed left to right starting at the origin. After each
/// placement the cursor advances by `horizontal_spacing`; once it passes
/// `max_row_x` it wraps back to `origin_x` and moves down by
/// `vertical_spacing`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    origin_x: f32,
    origin_y: f32,
    horizontal_spacing: f32,
    vertical_spacing: f32,
    max_row_x: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin_x: 100.0,
            origin_y: 100.0,
            horizontal_spacing: 150.0,
            vertical_spacing: 100.0,
            max_row_x: 600.0,
        }
    }
}

impl LayoutConfig {
    /// Creates a layout configuration with the given origin and default spacing.
    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.origin_x = x;
        self.origin_y = y;
        self
    }

    /// Overrides the spacing between grid cells.
    pub fn with_spacing(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal_spacing = horizontal;
        self.vertical_spacing = vertical;
        self
    }

    /// Overrides the x position past which a row wraps.
    pub fn with_max_row_x(mut self, max_row_x: f32) -> Self {
        self.max_row_x = max_row_x;
        self
    }

    pub fn origin_x(&self) -> f32 {
        self.origin_x
    }

    pub fn origin_y(&self) -> f32 {
        self.origin_y
    }

    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    pub fn max_row_x(&self) -> f32 {
        self.max_row_x
    }
}

/// Model validation settings.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct ValidationConfig {
    /// Treat unresolved state references as errors instead of warnings.
    #[serde(default)]
    strict_references: bool,
}

impl ValidationConfig {
    pub fn new(strict_references: bool) -> Self {
        Self { strict_references }
    }

    pub fn strict_references(&self) -> bool {
        self.strict_references
    }

    pub(crate) fn to_validate_config(self) -> ValidateConfig {
        ValidateConfig::new(self.strict_references)
    }
}
