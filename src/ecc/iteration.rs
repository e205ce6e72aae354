//! One round of sum-product message passing.

use bitvec::prelude::*;
use ndarray::Array2;
use std::fmt::{self, Display, Formatter};

/// A tanh product that left the open interval (-1, 1), or a message that is not finite
///
/// The decoder keeps going with whatever value the arithmetic produced; the warning
/// only records where it happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericDomainWarning {
    /// Check node of the affected edge
    pub check: usize,
    /// Variable node of the affected edge
    pub variable: usize,
    /// Product of tanh terms that fed the message
    pub product: f64,
    /// Resulting variable-to-check message
    pub message: f64,
}

impl Display for NumericDomainWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "edge ({}, {}): tanh product {} gave message {}",
            self.check, self.variable, self.product, self.message
        )
    }
}

/// Messages, beliefs and parity of a single decoder iteration
///
/// Edge tables are `n_c x n_v`; entries for pairs that are not edges of the
/// parity-check matrix are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Iteration {
    pub(crate) c2v: Array2<Option<f64>>,
    pub(crate) v2c: Array2<Option<f64>>,
    pub(crate) marginal: Vec<f64>,
    pub(crate) bits: BitVec,
    pub(crate) syndrome: BitVec,
    pub(crate) warnings: Vec<NumericDomainWarning>,
}

impl Iteration {
    /// Check-to-variable message on edge `(c, v)`, the input of the tanh rule
    pub fn c2v(&self, c: usize, v: usize) -> Option<f64> {
        self.c2v.get((c, v)).copied().flatten()
    }

    /// Variable-to-check message on edge `(c, v)`, the output of the tanh rule
    pub fn v2c(&self, c: usize, v: usize) -> Option<f64> {
        self.v2c.get((c, v)).copied().flatten()
    }

    /// Full check-to-variable table
    pub fn c2v_table(&self) -> &Array2<Option<f64>> {
        &self.c2v
    }

    /// Full variable-to-check table
    pub fn v2c_table(&self) -> &Array2<Option<f64>> {
        &self.v2c
    }

    /// Total LLR of each variable
    pub fn marginals(&self) -> &[f64] {
        &self.marginal
    }

    /// Hard decision of each variable; negative marginals decide 1
    pub fn bits(&self) -> &BitSlice {
        &self.bits
    }

    /// Parity residual of each check
    pub fn syndrome(&self) -> &BitSlice {
        &self.syndrome
    }

    /// True when every parity check is satisfied
    pub fn is_valid(&self) -> bool {
        self.syndrome.not_any()
    }

    /// Edges whose messages left the finite domain
    pub fn warnings(&self) -> &[NumericDomainWarning] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

fn write_table(f: &mut Formatter<'_>, table: &Array2<Option<f64>>) -> fmt::Result {
    for row in table.rows() {
        for entry in row.iter() {
            match entry {
                Some(value) => write!(f, "{:7.4} ", value)?,
                None => write!(f, "{:8}", "")?,
            }
        }
        writeln!(f)?;
    }
    Ok(())
}

fn write_bits(f: &mut Formatter<'_>, bits: &BitSlice) -> fmt::Result {
    for bit in bits.iter() {
        write!(f, "{} ", if *bit { '1' } else { '0' })?;
    }
    writeln!(f)
}

impl Display for Iteration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Check-to-variable messages:")?;
        write_table(f, &self.c2v)?;
        writeln!(f)?;
        writeln!(f, "Variable-to-check messages:")?;
        write_table(f, &self.v2c)?;
        writeln!(f, "L:")?;
        for l in &self.marginal {
            write!(f, "{:7.4} ", l)?;
        }
        writeln!(f)?;
        writeln!(f, "Codeword:")?;
        write_bits(f, &self.bits)?;
        writeln!(f, "Parity:")?;
        write_bits(f, &self.syndrome)?;
        writeln!(f)?;
        if self.is_valid() {
            writeln!(f, " ===  Valid codeword  ===")?;
        } else {
            writeln!(f, " === Invalid codeword ===")?;
        }
        for warning in &self.warnings {
            writeln!(f, "numeric warning: {}", warning)?;
        }
        Ok(())
    }
}
