//! Connection line styles.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Visual style of a connection line.
///
/// Maps to the SVG `stroke-dasharray` attribute: solid lines get no
/// dasharray, dashed lines get "5,5", dotted lines get "2,2".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    /// Solid continuous line (default).
    #[default]
    Solid,
    /// Dashed line, 5px dash and 5px gap.
    Dashed,
    /// Dotted line, 2px dot and 2px gap.
    Dotted,
}

impl LineStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines.
    pub fn to_svg_value(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5"),
            Self::Dotted => Some("2,2"),
        }
    }

    /// Returns the canonical lowercase name of this style.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
        }
    }
}

impl FromStr for LineStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            _ => Err(format!(
                "invalid line style `{s}`, valid values: solid, dashed, dotted"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_style_dasharray() {
        assert_eq!(LineStyle::Solid.to_svg_value(), None);
        assert_eq!(LineStyle::Dashed.to_svg_value(), Some("5,5"));
        assert_eq!(LineStyle::Dotted.to_svg_value(), Some("2,2"));
    }

    #[test]
    fn test_line_style_from_str() {
        assert_eq!(LineStyle::from_str("solid").unwrap(), LineStyle::Solid);
        assert_eq!(LineStyle::from_str("dashed").unwrap(), LineStyle::Dashed);
        assert_eq!(LineStyle::from_str("dotted").unwrap(), LineStyle::Dotted);

        let result = LineStyle::from_str("wavy");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("invalid line style"));
    }

    #[test]
    fn test_line_style_names_round_trip() {
        for style in [LineStyle::Solid, LineStyle::Dashed, LineStyle::Dotted] {
            assert_eq!(LineStyle::from_str(style.as_str()).unwrap(), style);
        }
    }
}
