use crate::foundation::error::{StoryreelError, StoryreelResult};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One `(position, value)` pair of a piecewise curve.
pub struct Knot {
    /// Position on the frame axis.
    pub at: f64,
    /// Curve value at `at`.
    pub value: f64,
}

impl Knot {
    pub fn new(at: f64, value: f64) -> Self {
        Self { at, value }
    }
}

/// Piecewise linear curve over an ordered knot sequence, held at its outer values.
///
/// Construction validates that there is at least one knot, that every position and value
/// is finite, and that positions never decrease. Sampling is therefore infallible.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Knot>", into = "Vec<Knot>")]
pub struct Curve {
    knots: Vec<Knot>,
}

impl Curve {
    /// Build a curve from explicit knots.
    pub fn new(knots: Vec<Knot>) -> StoryreelResult<Self> {
        if knots.is_empty() {
            return Err(StoryreelError::validation("curve must have at least one knot"));
        }
        if knots
            .iter()
            .any(|k| !k.at.is_finite() || !k.value.is_finite())
        {
            return Err(StoryreelError::validation(
                "curve knots must have finite positions and values",
            ));
        }
        if !knots.windows(2).all(|w| w[0].at <= w[1].at) {
            return Err(StoryreelError::validation(
                "curve knots must be sorted by position",
            ));
        }
        Ok(Self { knots })
    }

    /// Build a curve from parallel position/value slices.
    pub fn linear(positions: &[f64], values: &[f64]) -> StoryreelResult<Self> {
        if positions.len() != values.len() {
            return Err(StoryreelError::validation(format!(
                "curve has {} positions but {} values",
                positions.len(),
                values.len()
            )));
        }
        Self::new(
            positions
                .iter()
                .zip(values)
                .map(|(&at, &value)| Knot::new(at, value))
                .collect(),
        )
    }

    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    /// Sample the curve at `t`.
    pub fn sample(&self, t: f64) -> f64 {
        let first = &self.knots[0];
        let last = &self.knots[self.knots.len() - 1];
        if t <= first.at {
            return first.value;
        }
        if t >= last.at {
            return last.value;
        }

        for w in self.knots.windows(2) {
            let (a, b) = (&w[0], &w[1]);
            if t > b.at {
                continue;
            }
            let span = b.at - a.at;
            if span == 0.0 {
                return b.value;
            }
            let u = (t - a.at) / span;
            return a.value + (b.value - a.value) * u;
        }
        last.value
    }
}

impl TryFrom<Vec<Knot>> for Curve {
    type Error = StoryreelError;

    fn try_from(knots: Vec<Knot>) -> Result<Self, Self::Error> {
        Self::new(knots)
    }
}

impl From<Curve> for Vec<Knot> {
    fn from(curve: Curve) -> Self {
        curve.knots
    }
}

/// Linearly interpolate `t` over `positions -> values`, clamped at both ends.
pub fn interpolate(t: f64, positions: &[f64], values: &[f64]) -> StoryreelResult<f64> {
    Ok(Curve::linear(positions, values)?.sample(t))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/curve.rs"]
mod tests;
