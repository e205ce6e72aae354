//! Channel evidence for each variable node.
//!
//! Probabilities here are `P(bit = 0)`, so the matching log-likelihood ratio
//! `ln(p / (1 - p))` is positive when the channel favours a zero. Probabilities
//! are kept strictly inside (0, 1) so every LLR stays finite.

use crate::error::{Error, Result};
use log::debug;
use std::fmt::{self, Display, Formatter};

/// Smallest probability a variable may hold
pub const MIN_PROBABILITY: f64 = 0.01;
/// Largest probability a variable may hold
pub const MAX_PROBABILITY: f64 = 0.99;
/// Prior for variables without an explicit initial value
pub const DEFAULT_PROBABILITY: f64 = 0.5;

// Probabilities are edited on a grid of hundredths
const STEPS_PER_UNIT: f64 = 100.0;
/// Amount one increase or decrease moves a probability
pub const PROBABILITY_STEP: f64 = 1.0 / STEPS_PER_UNIT;
const MIN_STEP: i64 = 1;
const MAX_STEP: i64 = 99;
// Absorbs representation error such as 0.29 * 100 = 28.999999999999996
const TRUNCATION_SLACK: f64 = 1e-9;

/// Convert an LLR to the probability of a zero bit
///
/// Evaluated as the logistic function so large magnitudes do not overflow.
pub fn l_to_p(l: f64) -> f64 {
    if l >= 0.0 {
        1.0 / (1.0 + (-l).exp())
    } else {
        let e = l.exp();
        e / (1.0 + e)
    }
}

/// Convert the probability of a zero bit to an LLR
pub fn p_to_l(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

/// An initial belief about one variable
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Prior {
    /// Probability that the bit is 0
    Probability(f64),
    /// Log-likelihood ratio `ln(P(0) / P(1))`
    Llr(f64),
}

impl Prior {
    /// The belief expressed as a probability
    pub fn probability(self) -> f64 {
        match self {
            Prior::Probability(p) => p,
            Prior::Llr(l) => l_to_p(l),
        }
    }
}

impl Default for Prior {
    fn default() -> Self {
        Prior::Probability(DEFAULT_PROBABILITY)
    }
}

/// Which way to move a probability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increase,
    Decrease,
}

/// Per-variable prior probabilities
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelModel {
    probability: Vec<f64>,
}

impl ChannelModel {
    /// Create a channel model for `n_v` variables
    ///
    /// # Arguments
    ///
    /// * `n_v` - Number of variable nodes
    /// * `initial` - Explicit priors keyed by variable index; all other variables start at 0.5
    ///
    /// # Returns
    ///
    /// The model, `InvalidDimensions` if `n_v` is zero, or `IndexOutOfRange` if a prior
    /// names a variable that does not exist
    pub fn new(n_v: usize, initial: impl IntoIterator<Item = (usize, Prior)>) -> Result<Self> {
        if n_v == 0 {
            return Err(Error::InvalidDimensions(
                "channel needs at least one variable".to_string(),
            ));
        }

        let mut probability = vec![DEFAULT_PROBABILITY; n_v];
        for (v, prior) in initial {
            let slot = probability
                .get_mut(v)
                .ok_or_else(|| Error::out_of_range("prior", v, n_v))?;
            *slot = clamp_probability(prior.probability());
        }

        debug!("channel model with {} variables", n_v);
        Ok(ChannelModel { probability })
    }

    /// Create a channel model from leading LLRs; the remaining variables start at 0.5
    pub fn from_llrs(n_v: usize, llrs: &[f64]) -> Result<Self> {
        Self::from_priors(n_v, llrs.iter().map(|&l| Prior::Llr(l)).collect())
    }

    /// Create a channel model from leading probabilities; the remaining variables start at 0.5
    pub fn from_probabilities(n_v: usize, probabilities: &[f64]) -> Result<Self> {
        Self::from_priors(
            n_v,
            probabilities
                .iter()
                .map(|&p| Prior::Probability(p))
                .collect(),
        )
    }

    /// Create a channel model from leading priors; the remaining variables start at 0.5
    pub fn from_priors(n_v: usize, priors: Vec<Prior>) -> Result<Self> {
        if priors.len() > n_v {
            return Err(Error::InvalidDimensions(format!(
                "{} priors supplied for {} variables",
                priors.len(),
                n_v
            )));
        }
        Self::new(n_v, priors.into_iter().enumerate())
    }

    /// Number of variable nodes
    pub fn n_v(&self) -> usize {
        self.probability.len()
    }

    /// Probability that variable `v` is 0
    pub fn probability(&self, v: usize) -> Result<f64> {
        self.probability
            .get(v)
            .copied()
            .ok_or_else(|| Error::out_of_range("variable", v, self.n_v()))
    }

    /// Channel LLR of variable `v`, derived from its probability
    pub fn llr(&self, v: usize) -> Result<f64> {
        self.probability(v).map(p_to_l)
    }

    /// All probabilities in variable order
    pub fn probabilities(&self) -> &[f64] {
        &self.probability
    }

    /// All channel LLRs in variable order
    pub fn llrs(&self) -> Vec<f64> {
        self.probability.iter().copied().map(p_to_l).collect()
    }

    /// Raise the probability of variable `v` by one step
    pub fn increase(&mut self, v: usize) -> Result<()> {
        self.adjust(v, Direction::Increase)
    }

    /// Lower the probability of variable `v` by one step
    pub fn decrease(&mut self, v: usize) -> Result<()> {
        self.adjust(v, Direction::Decrease)
    }

    /// Truncate to two decimals, move one step, then clamp
    pub fn adjust(&mut self, v: usize, direction: Direction) -> Result<()> {
        let n_v = self.n_v();
        let p = self
            .probability
            .get_mut(v)
            .ok_or_else(|| Error::out_of_range("variable", v, n_v))?;

        let truncated = (*p * STEPS_PER_UNIT + TRUNCATION_SLACK).floor() as i64;
        let stepped = match direction {
            Direction::Increase => truncated + 1,
            Direction::Decrease => truncated - 1,
        };
        let old = *p;
        *p = stepped.clamp(MIN_STEP, MAX_STEP) as f64 / STEPS_PER_UNIT;

        debug!("variable {} probability {:.4} -> {:.2}", v, old, *p);
        Ok(())
    }
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        DEFAULT_PROBABILITY
    } else {
        p.clamp(MIN_PROBABILITY, MAX_PROBABILITY)
    }
}

impl Display for ChannelModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Channel")?;
        for p in &self.probability {
            write!(f, "{:7.4} ", p)?;
        }
        writeln!(f)?;
        writeln!(f, "Channel LLR")?;
        for p in &self.probability {
            write!(f, "{:7.4} ", p_to_l(*p))?;
        }
        writeln!(f)
    }
}
