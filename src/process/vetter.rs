//! Replacement of invalid raw values with NaN.

/// Marks raw values that are outside the valid bounds or equal a sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vetter {
    lower: Option<f64>,
    upper: Option<f64>,
    fill: Option<f64>,
    missing: Option<f64>,
}

impl Vetter {
    /// Create a vetter. Absent bounds and sentinels are not checked.
    pub fn new(
        lower: Option<f64>,
        upper: Option<f64>,
        fill: Option<f64>,
        missing: Option<f64>,
    ) -> Self {
        Self {
            lower,
            upper,
            fill,
            missing,
        }
    }

    /// A vetter that only maps NaN to NaN.
    pub fn pass_through() -> Self {
        Self::default()
    }

    /// Whether the vetter never changes a non-NaN value.
    pub fn is_pass_through(&self) -> bool {
        self.lower.is_none() && self.upper.is_none() && self.fill.is_none() && self.missing.is_none()
    }

    /// Vet one raw value.
    pub fn vet(&self, value: f64) -> f64 {
        if value.is_nan()
            || self.fill == Some(value)
            || self.missing == Some(value)
            || self.lower.is_some_and(|lower| value < lower)
            || self.upper.is_some_and(|upper| value > upper)
        {
            f64::NAN
        } else {
            value
        }
    }

    /// Vet a buffer in place.
    pub fn vet_all(&self, values: &mut [f64]) {
        if self.is_pass_through() {
            return;
        }
        values.iter_mut().for_each(|v| *v = self.vet(*v));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_become_nan() {
        let vetter = Vetter::new(None, None, Some(-999.0), Some(-1.0));
        assert!(vetter.vet(-999.0).is_nan());
        assert!(vetter.vet(-1.0).is_nan());
        assert_eq!(vetter.vet(3.0), 3.0);
    }

    #[test]
    fn test_out_of_bounds_become_nan() {
        let vetter = Vetter::new(Some(0.0), Some(10.0), None, None);
        assert!(vetter.vet(-0.5).is_nan());
        assert!(vetter.vet(10.5).is_nan());
        assert_eq!(vetter.vet(0.0), 0.0);
        assert_eq!(vetter.vet(10.0), 10.0);
    }

    #[test]
    fn test_pass_through_keeps_values() {
        let vetter = Vetter::pass_through();
        assert!(vetter.is_pass_through());
        let mut values = vec![1.0, f64::NAN, -4.0];
        vetter.vet_all(&mut values);
        assert_eq!(values[0], 1.0);
        assert!(values[1].is_nan());
        assert_eq!(values[2], -4.0);
    }
}
