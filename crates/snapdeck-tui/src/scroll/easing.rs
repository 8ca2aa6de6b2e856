//! Easing curves for transition animations

pub use snapdeck_core::EasingType;

/// Extension trait for EasingType with calculation methods
pub trait EasingTypeExt {
    /// Map progress `t` in [0, 1] to eased progress in [0, 1]
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::Cubic => 1.0 - (1.0 - t).powi(3),
            EasingType::Quintic => 1.0 - (1.0 - t).powi(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingType; 3] = [EasingType::Linear, EasingType::Cubic, EasingType::Quintic];

    #[test]
    fn test_endpoints() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-9, "{:?} at t=0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{:?} at t=1", easing);
            assert_eq!(easing.apply(2.0), easing.apply(1.0));
        }
    }

    #[test]
    fn test_ease_out_leads_linear() {
        assert!(EasingType::Cubic.apply(0.3) > EasingType::Linear.apply(0.3));
        assert!(EasingType::Quintic.apply(0.3) > EasingType::Cubic.apply(0.3));
    }
}
