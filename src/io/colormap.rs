//! Reversed viridis colour ramp for density choropleths

/// Viridis sampled at nine evenly spaced stops, dark to light
const VIRIDIS_STOPS: [[u8; 3]; 9] = [
    [68, 1, 84],
    [71, 44, 122],
    [59, 82, 139],
    [44, 113, 142],
    [33, 145, 140],
    [39, 173, 129],
    [92, 200, 99],
    [170, 220, 50],
    [253, 231, 37],
];

/// Viridis colour at `t` in `[0, 1]`, linearly interpolated between stops
pub fn viridis(t: f64) -> [u8; 3] {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let last = VIRIDIS_STOPS.len() - 1;
    let scaled = t * last as f64;
    let lower = (scaled.floor() as usize).min(last);
    let upper = (lower + 1).min(last);
    let fraction = scaled - lower as f64;

    let from = VIRIDIS_STOPS.get(lower).copied().unwrap_or([0, 0, 0]);
    let to = VIRIDIS_STOPS.get(upper).copied().unwrap_or(from);

    let mut rgb = [0u8; 3];
    for ((channel, a), b) in rgb.iter_mut().zip(from).zip(to) {
        let value = fraction.mul_add(f64::from(b) - f64::from(a), f64::from(a));
        *channel = value.round().clamp(0.0, 255.0) as u8;
    }
    rgb
}

/// Viridis with light colours at the low end
pub fn viridis_reversed(t: f64) -> [u8; 3] {
    viridis(1.0 - t)
}

/// Maps density values onto the reversed viridis ramp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    /// Value drawn with the lightest colour
    pub min: f64,
    /// Value drawn with the darkest colour
    pub max: f64,
}

impl ColorScale {
    /// Scale spanning the range of `values`, or `None` when empty
    pub fn from_values(values: &[u32]) -> Option<Self> {
        let min = values.iter().copied().min()?;
        let max = values.iter().copied().max()?;
        Some(Self {
            min: f64::from(min),
            max: f64::from(max),
        })
    }

    /// Position of `value` within the scale, `0.5` when the range is empty
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span > 0.0 {
            ((value - self.min) / span).clamp(0.0, 1.0)
        } else {
            0.5
        }
    }

    /// Opaque colour for `value`
    pub fn color(&self, value: f64) -> [u8; 4] {
        let [r, g, b] = viridis_reversed(self.normalize(value));
        [r, g, b, 255]
    }
}
