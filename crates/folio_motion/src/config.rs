//! Motion configuration
//!
//! Every timing and rate the components use. Defaults reproduce the site as
//! designed; a TOML document only needs the values it changes:
//!
//! ```toml
//! [menu]
//! stagger_ms = 150.0
//!
//! [button]
//! reset_ease = "elastic.out(1, 0.3)"
//! ```

use folio_animation::Easing;
use folio_platform::Color;
use serde::{Deserialize, Serialize};

use crate::error::{MotionError, Result};
use crate::shape::LerpRates;

/// Configuration for every motion component
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub menu: MenuConfig,
    pub cursor: CursorConfig,
    pub button: ButtonConfig,
    pub text: TextConfig,
    pub skills: SkillsConfig,
    pub preloader: PreloaderConfig,
}

impl MotionConfig {
    /// Parse a (possibly partial) TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.menu.validate()
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// =============================================================================
// Menu
// =============================================================================

/// Hamburger menu timings and path morph rates
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Blend rates while opening (any screen)
    pub lerp_open: LerpRates,
    /// Blend rates while closing on large screens
    pub lerp_close_large: LerpRates,
    /// Blend rates while closing below the breakpoint
    pub lerp_close_small: LerpRates,
    /// Minimum viewport width of a large screen
    pub breakpoint: f32,
    /// Distance under which the path snaps to its target
    pub threshold: f32,
    /// Logo color and item reveal duration
    pub duration_ms: f32,
    /// Duration used when reduced motion is requested
    pub reduced_duration_ms: f32,
    /// Delay between menu items
    pub stagger_ms: f32,
    /// Time into the open timeline at which the call-to-action hides and the
    /// reveal starts
    pub reveal_at_ms: f32,
    /// Vertical offset of hidden menu items
    pub item_offset: f32,
    /// Vertical offset of each icon line when closed
    pub line_offset: f32,
    /// Logo text color while the menu is open
    pub text_dark: Color,
    /// Logo text color while the menu is closed
    pub text_light: Color,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            lerp_open: LerpRates::OPEN,
            lerp_close_large: LerpRates::CLOSE_LARGE,
            lerp_close_small: LerpRates::CLOSE_SMALL,
            breakpoint: 1024.0,
            threshold: 0.01,
            duration_ms: 500.0,
            reduced_duration_ms: 100.0,
            stagger_ms: 100.0,
            reveal_at_ms: 500.0,
            item_offset: 50.0,
            line_offset: 3.0,
            text_dark: Color::from_hex(0x1a1a1a),
            text_light: Color::WHITE,
        }
    }
}

impl MenuConfig {
    /// Check the values the path morph needs to converge
    ///
    /// The snap threshold must be positive and every blend rate must lie in
    /// `(0, 1]`, otherwise the path never reaches its target.
    pub fn validate(&self) -> Result<()> {
        if !(self.threshold > 0.0 && self.threshold.is_finite()) {
            return Err(MotionError::InvalidValue {
                field: "menu.threshold",
                value: self.threshold,
                expected: "a positive distance",
            });
        }

        let rates = [
            ("menu.lerp_open.y", self.lerp_open.y),
            ("menu.lerp_open.c", self.lerp_open.c),
            ("menu.lerp_close_large.y", self.lerp_close_large.y),
            ("menu.lerp_close_large.c", self.lerp_close_large.c),
            ("menu.lerp_close_small.y", self.lerp_close_small.y),
            ("menu.lerp_close_small.c", self.lerp_close_small.c),
        ];
        for (field, value) in rates {
            if !(value > 0.0 && value <= 1.0) {
                return Err(MotionError::InvalidValue {
                    field,
                    value,
                    expected: "a rate in (0, 1]",
                });
            }
        }
        Ok(())
    }
}

// =============================================================================
// Cursor follower
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Fraction of the remaining distance covered each frame
    pub lerp: f32,
    /// The follower is only active on viewports wider than this
    pub breakpoint: f32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            lerp: 0.04,
            breakpoint: 1024.0,
        }
    }
}

// =============================================================================
// Magnetic buttons
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    /// Share of the pointer offset applied before the strength factor
    pub magnet_factor: f32,
    pub magnet_ease: Easing,
    pub magnet_duration_ms: f32,
    pub reset_ease: Easing,
    pub reset_duration_ms: f32,
    pub text_reset_ease: Easing,
    pub text_reset_duration_ms: f32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            magnet_factor: 0.5,
            magnet_ease: Easing::Power3Out,
            magnet_duration_ms: 500.0,
            reset_ease: Easing::elastic_out(1.2, 0.2),
            reset_duration_ms: 2500.0,
            text_reset_ease: Easing::Power3Out,
            text_reset_duration_ms: 500.0,
        }
    }
}

// =============================================================================
// Scroll reveals
// =============================================================================

/// Word and line reveals
///
/// Trigger positions are fractions of the viewport height measured from the
/// top (`0.75` is "element top at 75% of the viewport").
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub word_start_opacity: f32,
    pub word_stagger_ms: f32,
    pub word_duration_ms: f32,
    pub word_ease: Easing,
    pub word_start: f32,
    pub word_end: f32,
    pub line_duration_ms: f32,
    pub line_stagger_ms: f32,
    pub line_ease: Easing,
    pub line_start: f32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            word_start_opacity: 0.2,
            word_stagger_ms: 200.0,
            word_duration_ms: 1000.0,
            word_ease: Easing::Power2Out,
            word_start: 0.75,
            word_end: 0.35,
            line_duration_ms: 1000.0,
            line_stagger_ms: 50.0,
            line_ease: Easing::ExpoOut,
            line_start: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsConfig {
    /// Starting vertical offset
    pub distance: f32,
    pub duration_ms: f32,
    pub ease: Easing,
    pub start: f32,
    pub end: f32,
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            distance: 50.0,
            duration_ms: 1000.0,
            ease: Easing::Power2Out,
            start: 0.8,
            end: 0.4,
        }
    }
}

// =============================================================================
// Preloader
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreloaderConfig {
    pub fade_ms: f32,
    pub icon_ms: f32,
    pub char_ms: f32,
    pub char_stagger_ms: f32,
    pub border_ms: f32,
    pub move_ms: f32,
    /// Delay of the header controls after the header starts fading in
    pub controls_delay_ms: f32,
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self {
            fade_ms: 500.0,
            icon_ms: 1000.0,
            char_ms: 500.0,
            char_stagger_ms: 50.0,
            border_ms: 1000.0,
            move_ms: 1000.0,
            controls_delay_ms: 500.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_site() {
        let config = MotionConfig::default();
        assert_eq!(config.menu.lerp_open, LerpRates { y: 0.099, c: 0.125 });
        assert_eq!(config.menu.lerp_close_large, LerpRates { y: 0.033, c: 0.041 });
        assert_eq!(config.menu.breakpoint, 1024.0);
        assert_eq!(config.cursor.lerp, 0.04);
        assert_eq!(config.button.reset_ease, Easing::elastic_out(1.2, 0.2));
        assert_eq!(config.text.line_ease, Easing::ExpoOut);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = MotionConfig::from_toml_str(
            r##"
            [menu]
            stagger_ms = 150.0
            text_dark = "#000000"

            [button]
            reset_ease = "elastic.out(1, 0.3)"
            "##,
        )
        .unwrap();

        assert_eq!(config.menu.stagger_ms, 150.0);
        assert_eq!(config.menu.text_dark, Color::BLACK);
        assert_eq!(config.menu.duration_ms, 500.0);
        assert_eq!(config.button.reset_ease, Easing::elastic_out(1.0, 0.3));
        assert_eq!(config.cursor, CursorConfig::default());
    }

    #[test]
    fn test_invalid_easing_rejected() {
        let result = MotionConfig::from_toml_str("[skills]\nease = \"bounce.out\"\n");
        assert!(matches!(result, Err(MotionError::Config(_))));
    }

    #[test]
    fn test_serialized_defaults_parse_back() {
        let config = MotionConfig::default();
        let source = config.to_toml_string().unwrap();
        assert!(source.contains("reset_ease = \"elastic.out(1.2, 0.2)\""));
        assert_eq!(MotionConfig::from_toml_str(&source).unwrap(), config);
    }

    fn rejected_field(source: &str) -> &'static str {
        match MotionConfig::from_toml_str(source) {
            Err(MotionError::InvalidValue { field, .. }) => field,
            other => panic!("expected an invalid value, got {:?}", other),
        }
    }

    #[test]
    fn test_non_positive_threshold_rejected() {
        assert_eq!(rejected_field("[menu]\nthreshold = 0.0\n"), "menu.threshold");
        assert_eq!(rejected_field("[menu]\nthreshold = -0.5\n"), "menu.threshold");
        assert_eq!(rejected_field("[menu]\nthreshold = nan\n"), "menu.threshold");
    }

    #[test]
    fn test_rates_outside_unit_interval_rejected() {
        assert_eq!(
            rejected_field("[menu.lerp_open]\ny = 0.0\nc = 0.125\n"),
            "menu.lerp_open.y"
        );
        assert_eq!(
            rejected_field("[menu.lerp_close_large]\ny = 0.033\nc = -0.1\n"),
            "menu.lerp_close_large.c"
        );
        assert_eq!(
            rejected_field("[menu.lerp_close_small]\ny = 1.5\nc = 0.125\n"),
            "menu.lerp_close_small.y"
        );
    }

    #[test]
    fn test_full_rate_and_large_threshold_accepted() {
        let config = MotionConfig::from_toml_str(
            "[menu]\nthreshold = 5.0\n\n[menu.lerp_open]\ny = 1.0\nc = 1.0\n",
        )
        .unwrap();
        assert_eq!(config.menu.lerp_open, LerpRates { y: 1.0, c: 1.0 });
        assert!(MotionConfig::default().validate().is_ok());
    }
}
