//! # Inhibition functions
//!
//! ## pH inhibition
//!
//! Every uptake process of ADM1 is slowed down outside of its pH window
//! `[pH_LL, pH_UL]`. Several empirical shapes are in use; the trait
//! [`PhInhibitionModel`] abstracts over them and [`PhInhibition`] dispatches
//! statically between the variants.
//!
//! | Variant | Formula |
//! |---|---|
//! | `HydrogenIonHill` (BSM2 default) | `K^n / (S_H^n + K^n)`, `K = 10^-(UL+LL)/2`, `n = 3/(UL-LL)` |
//! | `ExponentialSwitch` | `exp(-3 ((pH-UL)/(UL-LL))^2)` below UL, 1 above |
//! | `PhHill` | `pH^m / (pH^m + pH_lim^m)`, `pH_lim = (UL+LL)/2` |
//! | `TanhSwitch` | `0.5 (1 + tanh(a (pH/pH_lim - 1)))`, `a = 25/(UL-LL+eps)` |
//!
//! ## Other factors
//!
//! Nitrogen limitation, hydrogen inhibition of the acetogens and free ammonia
//! inhibition of the acetoclasts are simple non-competitive terms.

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

const TANH_EPS: f64 = 1.0e-6;

/// Lower and upper pH bounds of an organism group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhWindow {
    pub upper: f64,
    pub lower: f64,
}

impl PhWindow {
    pub fn new(upper: f64, lower: f64) -> Self {
        PhWindow { upper, lower }
    }

    pub fn midpoint(&self) -> f64 {
        0.5 * (self.upper + self.lower)
    }
}

#[enum_dispatch]
pub trait PhInhibitionModel {
    /// Inhibition factor in [0, 1] for the free proton concentration `s_h` (kmol/m³).
    fn inhibition(&self, s_h: f64, window: PhWindow) -> f64;
}

/// Hill function on the free proton concentration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HydrogenIonHill;

impl PhInhibitionModel for HydrogenIonHill {
    fn inhibition(&self, s_h: f64, window: PhWindow) -> f64 {
        let ph_lim = 10f64.powf(-window.midpoint());
        let n = 3.0 / (window.upper - window.lower);
        let lim_n = ph_lim.powf(n);
        lim_n / (s_h.powf(n) + lim_n)
    }
}

/// One-sided exponential switch of the IWA ADM1 report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExponentialSwitch;

impl PhInhibitionModel for ExponentialSwitch {
    fn inhibition(&self, s_h: f64, window: PhWindow) -> f64 {
        let ph = -s_h.log10();
        if ph < window.upper {
            let width = window.upper - window.lower;
            (-3.0 * (ph - window.upper).powi(2) / (width * width)).exp()
        } else {
            1.0
        }
    }
}

/// Hill function written on pH instead of S_H.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhHill {
    pub exponent: f64,
}

impl PhInhibitionModel for PhHill {
    fn inhibition(&self, s_h: f64, window: PhWindow) -> f64 {
        let ph = -s_h.log10();
        let ph_m = ph.powf(self.exponent);
        ph_m / (ph_m + window.midpoint().powf(self.exponent))
    }
}

/// Hyperbolic tangent switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TanhSwitch;

impl PhInhibitionModel for TanhSwitch {
    fn inhibition(&self, s_h: f64, window: PhWindow) -> f64 {
        let ph = -s_h.log10();
        let a = 25.0 / (window.upper - window.lower + TANH_EPS);
        0.5 * (1.0 + (a * (ph / window.midpoint() - 1.0)).tanh())
    }
}

#[enum_dispatch(PhInhibitionModel)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PhInhibition {
    HydrogenIonHill(HydrogenIonHill),
    ExponentialSwitch(ExponentialSwitch),
    PhHill(PhHill),
    TanhSwitch(TanhSwitch),
}

impl Default for PhInhibition {
    fn default() -> Self {
        PhInhibition::HydrogenIonHill(HydrogenIonHill)
    }
}

/// pH inhibition shape per organism group.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhInhibitionSet {
    /// acidogens and acetogens (sugar, amino acid, LCFA, C4, propionate uptake)
    pub acidogens: PhInhibition,
    pub acetoclasts: PhInhibition,
    pub hydrogenotrophs: PhInhibition,
}

impl PhInhibitionSet {
    pub fn uniform(model: PhInhibition) -> Self {
        PhInhibitionSet {
            acidogens: model,
            acetoclasts: model,
            hydrogenotrophs: model,
        }
    }

    /// Hill-on-pH shapes with the exponents proposed at the 2005 ADM1 workshop.
    pub fn ph_hill_workshop() -> Self {
        PhInhibitionSet {
            acidogens: PhInhibition::PhHill(PhHill { exponent: 24.0 }),
            acetoclasts: PhInhibition::PhHill(PhHill { exponent: 45.0 }),
            hydrogenotrophs: PhInhibition::PhHill(PhHill { exponent: 45.0 }),
        }
    }
}

/// Inorganic nitrogen limitation. Zero when no S_IN is present.
pub fn nitrogen_limitation(k_s_in: f64, s_in: f64) -> f64 {
    1.0 / (1.0 + k_s_in / s_in)
}

/// Non-competitive inhibition `1 / (1 + S_I / K_I)`.
pub fn non_competitive(s_inhibitor: f64, k_i: f64) -> f64 {
    1.0 / (1.0 + s_inhibitor / k_i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn hill_is_one_half_at_window_midpoint() {
        let model = PhInhibition::default();
        let lower = 4.0;
        for width in [0.5, 1.0, 1.5, 2.0, 2.5, 3.0] {
            let window = PhWindow::new(lower + width, lower);
            let s_h = 10f64.powf(-window.midpoint());
            assert_relative_eq!(model.inhibition(s_h, window), 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn hill_limits() {
        let window = PhWindow::new(5.5, 4.0);
        let model = HydrogenIonHill;
        assert!(model.inhibition(1e-8, window) > 0.999);
        assert!(model.inhibition(1e-2, window) < 0.01);
    }

    #[test]
    fn alternative_shapes_are_bounded_and_monotone() {
        let window = PhWindow::new(7.0, 6.0);
        let models = [
            PhInhibition::ExponentialSwitch(ExponentialSwitch),
            PhInhibition::PhHill(PhHill { exponent: 45.0 }),
            PhInhibition::TanhSwitch(TanhSwitch),
        ];
        for model in models {
            let mut previous = 0.0;
            for ph in [5.0, 5.5, 6.0, 6.5, 7.0, 7.5, 8.0] {
                let value = model.inhibition(10f64.powf(-ph), window);
                assert!((0.0..=1.0).contains(&value));
                assert!(value >= previous);
                previous = value;
            }
        }
        let exp = ExponentialSwitch;
        assert_eq!(exp.inhibition(1e-8, window), 1.0);
        assert_relative_eq!(exp.inhibition(1e-6, window), (-3.0f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn simple_factors() {
        assert_relative_eq!(nitrogen_limitation(1e-4, 1e-4), 0.5);
        assert_eq!(nitrogen_limitation(1e-4, 0.0), 0.0);
        assert_relative_eq!(non_competitive(5e-6, 5e-6), 0.5);
        assert_eq!(non_competitive(0.0, 5e-6), 1.0);
    }

    #[test]
    fn set_serializes_with_variant_names() {
        let set = PhInhibitionSet::ph_hill_workshop();
        let json = serde_json::to_string(&set).unwrap();
        assert!(json.contains("PhHill"));
        let back: PhInhibitionSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
