//! Configuration types for the diagram editor.
//!
//! This module provides configuration structures that control grid snapping,
//! new-node placement, and rendering style. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources.
//!
//! # Overview
//!
//! - [`EditorConfig`] - Top-level configuration combining the sections below.
//! - [`GridConfig`] - Grid cell size, visibility, and snapping default.
//! - [`PlacementConfig`] - The zone new nodes are scattered into.
//! - [`StyleConfig`] - Visual styling such as the export background color.
//!
//! # Example
//!
//! ```
//! # use vellum::config::EditorConfig;
//! let config = EditorConfig::default();
//! assert_eq!(config.grid().size(), 20.0);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use vellum_core::{catalog::Locale, color::Color, geometry::Point};

/// Top-level editor configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditorConfig {
    /// Grid configuration section.
    #[serde(default)]
    grid: GridConfig,

    /// Placement configuration section.
    #[serde(default)]
    placement: PlacementConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Locale used for default labels on newly placed nodes.
    #[serde(default)]
    locale: Locale,
}

impl EditorConfig {
    /// Returns the grid configuration.
    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    /// Returns the placement configuration.
    pub fn placement(&self) -> &PlacementConfig {
        &self.placement
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the label locale.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Replaces the label locale.
    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }
}

/// Grid cell size, visibility, and snapping default.
#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    /// Grid cell size in canvas units.
    #[serde(default = "GridConfig::default_size")]
    size: f32,

    /// Whether positions snap to the grid by default.
    #[serde(default = "GridConfig::default_snap")]
    snap: bool,

    /// Whether the grid is shown by default.
    #[serde(default = "GridConfig::default_visible")]
    visible: bool,
}

impl GridConfig {
    fn default_size() -> f32 {
        20.0
    }

    fn default_snap() -> bool {
        true
    }

    fn default_visible() -> bool {
        true
    }

    /// Returns the grid cell size.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Returns whether snapping is on by default.
    pub fn snap(&self) -> bool {
        self.snap
    }

    /// Returns whether the grid is visible by default.
    pub fn visible(&self) -> bool {
        self.visible
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: Self::default_size(),
            snap: Self::default_snap(),
            visible: Self::default_visible(),
        }
    }
}

/// The rectangular zone that nodes placed without an explicit position are
/// scattered into.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacementConfig {
    #[serde(default = "PlacementConfig::default_x")]
    x: f32,
    #[serde(default = "PlacementConfig::default_y")]
    y: f32,
    #[serde(default = "PlacementConfig::default_width")]
    width: f32,
    #[serde(default = "PlacementConfig::default_height")]
    height: f32,
}

impl PlacementConfig {
    fn default_x() -> f32 {
        200.0
    }

    fn default_y() -> f32 {
        150.0
    }

    fn default_width() -> f32 {
        200.0
    }

    fn default_height() -> f32 {
        100.0
    }

    /// Returns the zone origin.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns the zone width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the zone height.
    pub fn height(&self) -> f32 {
        self.height
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            x: Self::default_x(),
            y: Self::default_y(),
            width: Self::default_width(),
            height: Self::default_height(),
        }
    }
}

/// Visual styling configuration for rendered diagrams.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Export background [`Color`] as a color string. Falls back to the
    /// renderer default when unset.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is
    /// configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed into
    /// a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}
