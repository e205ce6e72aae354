//! Sum-product (belief propagation) decoding in the LLR domain.
//!
//! The engine runs a fixed number of flooding iterations and records every one
//! of them. Each iteration `k` takes the check-to-variable table `c2v[k]` and:
//!
//! 1. applies the tanh rule at every check, excluding the edge being updated:
//!    `v2c[k][c][v] = ln((1 + t) / (1 - t))`, `t = prod_{v' != v} tanh(c2v[k][c][v'] / 2)`
//! 2. sums the channel LLR and every incoming `v2c` into the marginal of each
//!    variable and takes the hard decision (negative marginal means bit 1)
//! 3. computes the syndrome of the hard decisions
//! 4. unless it is the last iteration, builds `c2v[k + 1]` with the sum rule,
//!    again leaving out the edge being updated
//!
//! Iteration 0 starts from the channel LLR broadcast onto every edge. There is
//! no convergence test: a valid codeword mid-trace does not stop the run.
//!
//! A tanh product that reaches exactly +/-1 yields an infinite (or NaN) message.
//! That value is propagated unchanged and reported as a [`NumericDomainWarning`]
//! on the iteration where it happened.

use crate::ecc::channel::ChannelModel;
use crate::ecc::iteration::{Iteration, NumericDomainWarning};
use crate::ecc::parity_check::ParityCheckMatrix;
use crate::ecc::trace::DecodeTrace;
use crate::error::{Error, Result};
use bitvec::prelude::*;
use log::{debug, trace, warn};
use ndarray::Array2;

/// Default number of decoding iterations
pub const DEFAULT_ITERATIONS: usize = 8;

type EdgeTable = Array2<Option<f64>>;

/// Flooding sum-product decoder with a fixed iteration count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SumProductEngine {
    /// Number of iterations every resolve produces
    iterations: usize,
}

impl Default for SumProductEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SumProductEngine {
    /// Create an engine running `DEFAULT_ITERATIONS` iterations
    pub fn new() -> Self {
        SumProductEngine {
            iterations: DEFAULT_ITERATIONS,
        }
    }

    /// Set the number of iterations each resolve produces
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Run the full decoder and record every iteration
    ///
    /// # Arguments
    ///
    /// * `matrix` - Parity-check matrix of the code
    /// * `channel` - Prior probability of each variable
    ///
    /// # Returns
    ///
    /// A trace of exactly `iterations()` iterations, or an error when the channel
    /// width does not match the matrix or the iteration count is zero
    pub fn resolve(
        &self,
        matrix: &ParityCheckMatrix,
        channel: &ChannelModel,
    ) -> Result<DecodeTrace> {
        self.validate(matrix, channel)?;

        let channel_llr = channel.llrs();
        debug!(
            "resolving {} iterations over {}x{} matrix",
            self.iterations,
            matrix.n_c(),
            matrix.n_v()
        );

        let mut iterations = Vec::with_capacity(self.iterations);
        let mut pending = Some(broadcast(matrix, &channel_llr));

        while let Some(c2v) = pending.take() {
            let k = iterations.len();

            let (v2c, warnings) = tanh_rule(matrix, &c2v);
            let marginal = marginals(matrix, &channel_llr, &v2c);
            let bits: BitVec = marginal.iter().map(|&l| l < 0.0).collect();
            let syndrome = matrix.syndrome(&bits)?;

            for warning in &warnings {
                warn!("iteration {}: {}", k, warning);
            }
            trace!(
                "iteration {}: bits {} syndrome {}",
                k,
                render_bits(&bits),
                render_bits(&syndrome)
            );

            if k + 1 < self.iterations {
                pending = Some(sum_rule(matrix, &channel_llr, &v2c));
            }

            iterations.push(Iteration {
                c2v,
                v2c,
                marginal,
                bits,
                syndrome,
                warnings,
            });
        }

        Ok(DecodeTrace::new(channel_llr, iterations))
    }

    fn validate(&self, matrix: &ParityCheckMatrix, channel: &ChannelModel) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::InvalidInput(
                "iteration count must be positive".to_string(),
            ));
        }
        if channel.n_v() != matrix.n_v() {
            return Err(Error::InvalidDimensions(format!(
                "channel has {} variables, matrix has {}",
                channel.n_v(),
                matrix.n_v()
            )));
        }
        Ok(())
    }
}

fn empty_table(matrix: &ParityCheckMatrix) -> EdgeTable {
    Array2::from_elem((matrix.n_c(), matrix.n_v()), None)
}

// Every edge of a table built here holds Some
fn message(table: &EdgeTable, c: usize, v: usize) -> f64 {
    table[[c, v]].unwrap_or(f64::NAN)
}

/// Channel evidence copied onto every edge
fn broadcast(matrix: &ParityCheckMatrix, channel_llr: &[f64]) -> EdgeTable {
    let mut table = empty_table(matrix);
    for (c, v) in matrix.edges() {
        table[[c, v]] = Some(channel_llr[v]);
    }
    table
}

/// Combine, at each check, the messages of every other connected variable
fn tanh_rule(
    matrix: &ParityCheckMatrix,
    c2v: &EdgeTable,
) -> (EdgeTable, Vec<NumericDomainWarning>) {
    let mut v2c = empty_table(matrix);
    let mut warnings = Vec::new();

    for (c, v) in matrix.edges() {
        let product = matrix
            .variables_of(c)
            .filter(|&other| other != v)
            .fold(1.0, |t, other| t * (message(c2v, c, other) / 2.0).tanh());

        let value = ((1.0 + product) / (1.0 - product)).ln();
        if product.abs() >= 1.0 || !value.is_finite() {
            warnings.push(NumericDomainWarning {
                check: c,
                variable: v,
                product,
                message: value,
            });
        }
        v2c[[c, v]] = Some(value);
    }

    (v2c, warnings)
}

/// Channel LLR plus every incoming message, per variable
fn marginals(matrix: &ParityCheckMatrix, channel_llr: &[f64], v2c: &EdgeTable) -> Vec<f64> {
    channel_llr
        .iter()
        .enumerate()
        .map(|(v, &llr)| {
            matrix
                .checks_of(v)
                .fold(llr, |sum, c| sum + message(v2c, c, v))
        })
        .collect()
}

/// Channel LLR plus the messages from every other check, per edge
fn sum_rule(matrix: &ParityCheckMatrix, channel_llr: &[f64], v2c: &EdgeTable) -> EdgeTable {
    let mut c2v = empty_table(matrix);
    for (c, v) in matrix.edges() {
        let sum = matrix
            .checks_of(v)
            .filter(|&other| other != c)
            .fold(channel_llr[v], |sum, other| sum + message(v2c, other, v));
        c2v[[c, v]] = Some(sum);
    }
    c2v
}

fn render_bits(bits: &BitSlice) -> String {
    bits.iter().map(|bit| if *bit { '1' } else { '0' }).collect()
}
