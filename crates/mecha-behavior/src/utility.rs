//! Utility scoring: considerations, response curves and aggregation.
//!
//! A [`Consideration`] reads one raw scalar from the context, normalizes it
//! into `[0, 1]` and shapes it through a [`ResponseCurve`]. A
//! [`UtilityScorer`] folds its considerations with an [`Aggregation`] and,
//! when chosen by a utility selector, executes its single child.

use crate::{Blackboard, Node, NodeError, Status};

/// Shape applied to a normalized input `x ∈ [0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseCurve {
    /// `slope * x + offset`
    Linear { slope: f64, offset: f64 },
    /// `x ^ exponent`
    Power { exponent: f64 },
    /// `1 - x`
    Inverse,
    /// S-curve centered on `midpoint`.
    Logistic { steepness: f64, midpoint: f64 },
    /// 1 at or above `threshold`, else 0.
    Step { threshold: f64 },
}

impl Default for ResponseCurve {
    fn default() -> Self {
        ResponseCurve::Linear {
            slope: 1.0,
            offset: 0.0,
        }
    }
}

impl ResponseCurve {
    /// Evaluate and clamp to `[0, 1]`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let y = match *self {
            ResponseCurve::Linear { slope, offset } => slope * x + offset,
            ResponseCurve::Power { exponent } => x.max(0.0).powf(exponent),
            ResponseCurve::Inverse => 1.0 - x,
            ResponseCurve::Logistic {
                steepness,
                midpoint,
            } => 1.0 / (1.0 + (-steepness * (x - midpoint)).exp()),
            ResponseCurve::Step { threshold } => {
                if x >= threshold {
                    1.0
                } else {
                    0.0
                }
            }
        };
        if y.is_nan() {
            0.0
        } else {
            y.clamp(0.0, 1.0)
        }
    }
}

type Input<C> = Box<dyn Fn(&C, &Blackboard) -> f64>;

/// One scored aspect of the situation.
pub struct Consideration<C> {
    name: &'static str,
    input: Input<C>,
    range: (f64, f64),
    curve: ResponseCurve,
}

impl<C: 'static> Consideration<C> {
    /// Consideration over a raw input already expressed in `[0, 1]`.
    pub fn new(name: &'static str, input: impl Fn(&C, &Blackboard) -> f64 + 'static) -> Self {
        Self {
            name,
            input: Box::new(input),
            range: (0.0, 1.0),
            curve: ResponseCurve::default(),
        }
    }

    /// Fixed score, handy for fallback options.
    pub fn constant(score: f64) -> Self {
        Self::new("constant", move |_, _| score)
    }

    /// Normalize the raw input from `[min, max]` into `[0, 1]`.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn with_curve(mut self, curve: ResponseCurve) -> Self {
        self.curve = curve;
        self
    }
}

impl<C> Consideration<C> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn score(&self, ctx: &C, bb: &Blackboard) -> f64 {
        let raw = (self.input)(ctx, bb);
        let (min, max) = self.range;
        let span = max - min;
        let x = if span.abs() <= f64::EPSILON {
            if raw >= max {
                1.0
            } else {
                0.0
            }
        } else {
            ((raw - min) / span).clamp(0.0, 1.0)
        };
        self.curve.evaluate(x)
    }
}

/// How consideration scores fold into one utility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregation {
    #[default]
    Average,
    Min,
    Max,
    Multiply,
}

impl Aggregation {
    /// Fold a list of scores. An empty list aggregates to 0.
    pub fn aggregate(self, scores: &[f64]) -> f64 {
        if scores.is_empty() {
            return 0.0;
        }
        match self {
            Aggregation::Average => scores.iter().sum::<f64>() / scores.len() as f64,
            Aggregation::Min => scores.iter().copied().fold(f64::INFINITY, f64::min),
            Aggregation::Max => scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Aggregation::Multiply => scores.iter().product(),
        }
    }
}

/// Decorator pairing a child with the considerations that score it.
pub struct UtilityScorer<C> {
    name: &'static str,
    considerations: Vec<Consideration<C>>,
    aggregation: Aggregation,
    child: Node<C>,
}

impl<C> UtilityScorer<C> {
    pub fn new(name: &'static str, considerations: Vec<Consideration<C>>, child: Node<C>) -> Self {
        Self {
            name,
            considerations,
            aggregation: Aggregation::default(),
            child,
        }
    }

    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current utility of this option.
    pub fn score(&self, ctx: &C, bb: &Blackboard) -> f64 {
        let scores: Vec<f64> = self
            .considerations
            .iter()
            .map(|c| c.score(ctx, bb))
            .collect();
        self.aggregation.aggregate(&scores)
    }

    pub fn tick(&mut self, ctx: &mut C, bb: &mut Blackboard) -> Result<Status, NodeError> {
        self.child.tick(ctx, bb)
    }
}
