//! The ordered record of every iteration of one decoder run.

use crate::ecc::iteration::Iteration;
use crate::error::{Error, Result};

/// Fixed-length sequence of iterations produced by a single resolve
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeTrace {
    channel_llr: Vec<f64>,
    iterations: Vec<Iteration>,
}

impl DecodeTrace {
    pub(crate) fn new(channel_llr: Vec<f64>, iterations: Vec<Iteration>) -> Self {
        DecodeTrace {
            channel_llr,
            iterations,
        }
    }

    /// Iteration `k`, counting from zero
    pub fn at(&self, k: usize) -> Result<&Iteration> {
        self.iterations
            .get(k)
            .ok_or_else(|| Error::out_of_range("iteration", k, self.iterations.len()))
    }

    /// Number of iterations in the trace
    pub fn len(&self) -> usize {
        self.iterations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.iterations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Iteration> {
        self.iterations.iter()
    }

    /// The final iteration, whose syndrome decides whether decoding succeeded
    pub fn last(&self) -> Option<&Iteration> {
        self.iterations.last()
    }

    /// Channel LLRs the run started from
    pub fn channel_llr(&self) -> &[f64] {
        &self.channel_llr
    }

    /// Index of the first iteration whose hard decisions form a codeword
    pub fn first_valid(&self) -> Option<usize> {
        self.iterations.iter().position(Iteration::is_valid)
    }

    /// Whether any iteration saw a saturated tanh product
    pub fn has_warnings(&self) -> bool {
        self.iterations.iter().any(Iteration::has_warnings)
    }
}

impl<'a> IntoIterator for &'a DecodeTrace {
    type Item = &'a Iteration;
    type IntoIter = std::slice::Iter<'a, Iteration>;

    fn into_iter(self) -> Self::IntoIter {
        self.iterations.iter()
    }
}
