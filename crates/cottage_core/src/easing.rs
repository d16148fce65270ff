//! Easing curves
//!
//! Names follow the GSAP convention: `power2.inOut`, `sine.out`, `none`.
//! A bare family name (`"expo"`) means the `.out` variant. The older
//! `Power2.easeInOut` spelling is accepted as well, and `power0` is linear.
//!
//! `back` uses an overshoot of 1.70158 in every direction. `back.inOut` is
//! built from two halves of `back.in`, as in GSAP 3; Penner's older
//! in-out form scales the overshoot by 1.525 and is not provided.
//!
//! Every curve maps normalised time in [0, 1] to progress with `f(0) = 0`
//! and `f(1) = 1`. `back`, `elastic` and `bounce` overshoot or oscillate in
//! between; the rest are monotonic.

use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::tween::TweenError;

/// Shape of an easing curve, independent of direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Curve {
    /// t^2 (alias `quad`)
    Power1,
    /// t^3 (alias `cubic`)
    Power2,
    /// t^4 (alias `quart`)
    Power3,
    /// t^5 (aliases `quint`, `strong`)
    Power4,
    Sine,
    Expo,
    Circ,
    Back,
    Bounce,
    Elastic,
}

impl Curve {
    const ALL: [Curve; 10] = [
        Curve::Power1,
        Curve::Power2,
        Curve::Power3,
        Curve::Power4,
        Curve::Sine,
        Curve::Expo,
        Curve::Circ,
        Curve::Back,
        Curve::Bounce,
        Curve::Elastic,
    ];

    fn name(self) -> &'static str {
        match self {
            Curve::Power1 => "power1",
            Curve::Power2 => "power2",
            Curve::Power3 => "power3",
            Curve::Power4 => "power4",
            Curve::Sine => "sine",
            Curve::Expo => "expo",
            Curve::Circ => "circ",
            Curve::Back => "back",
            Curve::Bounce => "bounce",
            Curve::Elastic => "elastic",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        let curve = match name {
            "power1" | "quad" => Curve::Power1,
            "power2" | "cubic" => Curve::Power2,
            "power3" | "quart" => Curve::Power3,
            "power4" | "quint" | "strong" => Curve::Power4,
            "sine" => Curve::Sine,
            "expo" => Curve::Expo,
            "circ" => Curve::Circ,
            "back" => Curve::Back,
            "bounce" => Curve::Bounce,
            "elastic" => Curve::Elastic,
            _ => return None,
        };
        Some(curve)
    }

    /// The ease-in form of the curve, for t strictly inside (0, 1)
    fn ease_in(self, t: f32) -> f32 {
        match self {
            Curve::Power1 => t.powi(2),
            Curve::Power2 => t.powi(3),
            Curve::Power3 => t.powi(4),
            Curve::Power4 => t.powi(5),
            Curve::Sine => 1.0 - (t * FRAC_PI_2).cos(),
            Curve::Expo => 2f32.powf(10.0 * (t - 1.0)),
            Curve::Circ => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            Curve::Back => {
                const OVERSHOOT: f32 = 1.70158;
                t * t * ((OVERSHOOT + 1.0) * t - OVERSHOOT)
            }
            Curve::Bounce | Curve::Elastic => 1.0 - self.ease_out(1.0 - t),
        }
    }

    /// The ease-out form of the curve, for t strictly inside (0, 1)
    fn ease_out(self, t: f32) -> f32 {
        match self {
            Curve::Bounce => bounce_out(t),
            Curve::Elastic => {
                const PERIOD: f32 = 0.3;
                let phase = PERIOD / 4.0;
                2f32.powf(-10.0 * t) * ((t - phase) * (2.0 * PI) / PERIOD).sin() + 1.0
            }
            _ => 1.0 - self.ease_in(1.0 - t),
        }
    }

    fn ease_in_out(self, t: f32) -> f32 {
        if t < 0.5 {
            self.ease_in(t * 2.0) / 2.0
        } else {
            1.0 - self.ease_in((1.0 - t) * 2.0) / 2.0
        }
    }
}

fn bounce_out(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

/// An easing function mapping normalised time to progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    /// Constant speed (`none` / `linear`)
    #[default]
    Linear,
    /// Accelerate from rest
    In(Curve),
    /// Decelerate to rest
    Out(Curve),
    /// Accelerate then decelerate
    InOut(Curve),
}

impl Ease {
    /// The curve used by the house fly-through
    pub const POWER2_IN_OUT: Ease = Ease::InOut(Curve::Power2);

    /// Map normalised time to progress
    ///
    /// `t` is clamped to [0, 1]; the endpoints are exact.
    pub fn apply(self, t: f32) -> f32 {
        // NaN falls into the first branch
        if !(t > 0.0) {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Ease::Linear => t,
            Ease::In(curve) => curve.ease_in(t),
            Ease::Out(curve) => curve.ease_out(t),
            Ease::InOut(curve) => curve.ease_in_out(t),
        }
    }

    /// False for curves that overshoot or oscillate
    pub fn is_monotonic(self) -> bool {
        match self {
            Ease::Linear => true,
            Ease::In(curve) | Ease::Out(curve) | Ease::InOut(curve) => {
                !matches!(curve, Curve::Back | Curve::Bounce | Curve::Elastic)
            }
        }
    }

    /// Every named ease, for exhaustive checks
    pub fn all() -> impl Iterator<Item = Ease> {
        std::iter::once(Ease::Linear).chain(Curve::ALL.into_iter().flat_map(|c| {
            [Ease::In(c), Ease::Out(c), Ease::InOut(c)]
        }))
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ease::Linear => write!(f, "none"),
            Ease::In(curve) => write!(f, "{}.in", curve.name()),
            Ease::Out(curve) => write!(f, "{}.out", curve.name()),
            Ease::InOut(curve) => write!(f, "{}.inOut", curve.name()),
        }
    }
}

impl FromStr for Ease {
    type Err = TweenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let (family, direction) = match lower.split_once('.') {
            Some((family, direction)) => (family, Some(direction)),
            None => (lower.as_str(), None),
        };

        if matches!(family, "none" | "linear" | "power0") {
            return match direction {
                None | Some("none") | Some("easenone") | Some("in") | Some("out") | Some("inout") => Ok(Ease::Linear),
                Some(_) => Err(TweenError::UnknownEase(s.to_string())),
            };
        }

        let curve = Curve::from_name(family).ok_or_else(|| TweenError::UnknownEase(s.to_string()))?;
        match direction {
            Some("in") | Some("easein") => Ok(Ease::In(curve)),
            None | Some("out") | Some("easeout") => Ok(Ease::Out(curve)),
            Some("inout") | Some("easeinout") => Ok(Ease::InOut(curve)),
            Some(_) => Err(TweenError::UnknownEase(s.to_string())),
        }
    }
}

impl TryFrom<String> for Ease {
    type Error = TweenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ease> for String {
    fn from(ease: Ease) -> Self {
        ease.to_string()
    }
}
