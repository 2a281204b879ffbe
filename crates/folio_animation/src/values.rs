//! Animatable value types
//!
//! Provides the interpolation trait used by timelines and by the
//! frame-driven followers, including blending of style values.

use folio_platform::{Color, Point, StyleValue};

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal (for settling detection)
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

/// `start * (1 - t) + end * t`
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start * (1.0 - t) + end * t
}

// ============================================================================
// f32 Implementation
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        lerp(*self, *other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

// ============================================================================
// Point Implementation
// ============================================================================

impl Interpolate for Point {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

// ============================================================================
// Color Implementation
// ============================================================================

impl Interpolate for Color {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Color::lerp(self, other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.r - other.r).abs() < epsilon
            && (self.g - other.g).abs() < epsilon
            && (self.b - other.b).abs() < epsilon
            && (self.a - other.a).abs() < epsilon
    }
}

// ============================================================================
// StyleValue Implementation
// ============================================================================

/// Numbers and colors blend; keywords (and mismatched kinds) switch to the
/// end value only once `t` reaches 1.
impl Interpolate for StyleValue {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        match (self, other) {
            (StyleValue::Number(a), StyleValue::Number(b)) => {
                StyleValue::Number(Interpolate::lerp(a, b, t))
            }
            (StyleValue::Color(a), StyleValue::Color(b)) => {
                StyleValue::Color(Interpolate::lerp(a, b, t))
            }
            _ if t >= 1.0 => other.clone(),
            _ => self.clone(),
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        match (self, other) {
            (StyleValue::Number(a), StyleValue::Number(b)) => a.approx_eq(b, epsilon),
            (StyleValue::Color(a), StyleValue::Color(b)) => a.approx_eq(b, epsilon),
            _ => self == other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_lerp() {
        assert_eq!(lerp(100.0, 0.0, 0.25), 75.0);
        assert_eq!(Interpolate::lerp(&0.0f32, &10.0, 1.0), 10.0);
        assert!(0.004f32.approx_eq(&0.0, 0.01));
    }

    #[test]
    fn test_point_lerp() {
        let p = Point::new(0.0, 0.0).lerp(&Point::new(100.0, 50.0), 0.04);
        assert!(p.approx_eq(&Point::new(4.0, 2.0), 1e-4));
    }

    #[test]
    fn test_style_value_blending() {
        let from = StyleValue::Number(0.0);
        let to = StyleValue::Number(50.0);
        assert_eq!(from.lerp(&to, 0.5), StyleValue::Number(25.0));

        let white = StyleValue::Color(Color::WHITE);
        let black = StyleValue::Color(Color::BLACK);
        let mid = white.lerp(&black, 0.5).as_color().unwrap();
        assert!(mid.approx_eq(&Color::rgb(0.5, 0.5, 0.5), 0.001));

        let none = StyleValue::keyword("none");
        let block = StyleValue::keyword("block");
        assert_eq!(none.lerp(&block, 0.99), none);
        assert_eq!(none.lerp(&block, 1.0), block);
    }
}
