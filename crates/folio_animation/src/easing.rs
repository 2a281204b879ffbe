//! Easing curves
//!
//! Names follow the tweening vocabulary used in the site's style guide
//! (`power3.out`, `elastic.out(1.2, 0.2)`), so configuration files can be
//! written the same way designers spec motion.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;

/// Easing function mapping linear progress (0..=1) to eased progress
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Easing {
    Linear,
    /// Quadratic ease-out (the default curve)
    Power1Out,
    /// Cubic ease-out
    Power2Out,
    /// Quartic ease-out
    Power3Out,
    /// Exponential ease-out
    ExpoOut,
    /// Overshooting spring-like ease-out
    ElasticOut { amplitude: f32, period: f32 },
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Power1Out
    }
}

impl Easing {
    pub const ELASTIC_AMPLITUDE: f32 = 1.0;
    pub const ELASTIC_PERIOD: f32 = 0.3;

    pub fn elastic_out(amplitude: f32, period: f32) -> Self {
        Easing::ElasticOut { amplitude, period }
    }

    /// Apply the curve to `t`, clamped to 0..=1
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::Power1Out => 1.0 - (1.0 - t).powi(2),
            Easing::Power2Out => 1.0 - (1.0 - t).powi(3),
            Easing::Power3Out => 1.0 - (1.0 - t).powi(4),
            Easing::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
            Easing::ElasticOut { amplitude, period } => elastic_out(t, amplitude, period),
        }
    }
}

fn elastic_out(t: f32, amplitude: f32, period: f32) -> f32 {
    if t >= 1.0 {
        return 1.0;
    }
    if t <= 0.0 {
        return 0.0;
    }
    let a = amplitude.max(1.0);
    let p = period / amplitude.min(1.0);
    let phase = p / (2.0 * PI) * (1.0 / a).asin();
    a * 2f32.powf(-10.0 * t) * ((t - phase) * (2.0 * PI) / p).sin() + 1.0
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => f.write_str("none"),
            Easing::Power1Out => f.write_str("power1.out"),
            Easing::Power2Out => f.write_str("power2.out"),
            Easing::Power3Out => f.write_str("power3.out"),
            Easing::ExpoOut => f.write_str("expo.out"),
            Easing::ElasticOut { amplitude, period } => {
                write!(f, "elastic.out({}, {})", amplitude, period)
            }
        }
    }
}

impl FromStr for Easing {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, params) = match s.split_once('(') {
            Some((name, rest)) => {
                let inner = rest
                    .strip_suffix(')')
                    .ok_or_else(|| AnimationError::InvalidEasingParams(s.to_string()))?;
                let params = inner
                    .split(',')
                    .map(|p| p.trim())
                    .filter(|p| !p.is_empty())
                    .map(|p| {
                        p.parse::<f32>()
                            .map_err(|_| AnimationError::InvalidEasingParams(s.to_string()))
                    })
                    .collect::<Result<Vec<f32>, _>>()?;
                (name.trim(), Some(params))
            }
            None => (s, None),
        };

        let easing = match name {
            "none" | "linear" => Easing::Linear,
            "power1" | "power1.out" => Easing::Power1Out,
            "power2" | "power2.out" => Easing::Power2Out,
            "power3" | "power3.out" => Easing::Power3Out,
            "expo" | "expo.out" => Easing::ExpoOut,
            "elastic" | "elastic.out" => {
                let params = params.unwrap_or_default();
                if params.len() > 2 {
                    return Err(AnimationError::InvalidEasingParams(s.to_string()));
                }
                return Ok(Easing::ElasticOut {
                    amplitude: params.first().copied().unwrap_or(Self::ELASTIC_AMPLITUDE),
                    period: params.get(1).copied().unwrap_or(Self::ELASTIC_PERIOD),
                });
            }
            _ => return Err(AnimationError::UnknownEasing(s.to_string())),
        };

        if params.is_some_and(|p| !p.is_empty()) {
            return Err(AnimationError::InvalidEasingParams(s.to_string()));
        }
        Ok(easing)
    }
}

impl TryFrom<String> for Easing {
    type Error = AnimationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Easing> for String {
    fn from(easing: Easing) -> Self {
        easing.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::Power1Out,
        Easing::Power2Out,
        Easing::Power3Out,
        Easing::ExpoOut,
        Easing::ElasticOut {
            amplitude: 1.2,
            period: 0.2,
        },
    ];

    #[test]
    fn test_endpoints() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing} at 1");
        }
    }

    #[test]
    fn test_out_curves_lead_linear() {
        for easing in [Easing::Power1Out, Easing::Power2Out, Easing::Power3Out, Easing::ExpoOut] {
            assert!(easing.apply(0.5) > 0.5, "{easing}");
        }
        assert!(Easing::Power3Out.apply(0.25) > Easing::Power1Out.apply(0.25));
    }

    #[test]
    fn test_elastic_overshoots() {
        let easing = Easing::elastic_out(1.2, 0.2);
        let peak = (1..100)
            .map(|i| easing.apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("power3.out".parse::<Easing>().unwrap(), Easing::Power3Out);
        assert_eq!("expo.out".parse::<Easing>().unwrap(), Easing::ExpoOut);
        assert_eq!("none".parse::<Easing>().unwrap(), Easing::Linear);
        assert_eq!(
            "elastic.out(1.2, 0.2)".parse::<Easing>().unwrap(),
            Easing::elastic_out(1.2, 0.2)
        );
        assert_eq!(
            "elastic.out".parse::<Easing>().unwrap(),
            Easing::elastic_out(1.0, 0.3)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "bounce.out".parse::<Easing>(),
            Err(AnimationError::UnknownEasing(_))
        ));
        assert!(matches!(
            "elastic.out(1.2".parse::<Easing>(),
            Err(AnimationError::InvalidEasingParams(_))
        ));
        assert!(matches!(
            "power2.out(3)".parse::<Easing>(),
            Err(AnimationError::InvalidEasingParams(_))
        ));
    }

    #[test]
    fn test_display_parses_back() {
        for easing in ALL {
            assert_eq!(easing.to_string().parse::<Easing>().unwrap(), easing);
        }
    }
}
