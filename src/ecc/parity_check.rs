//! Parity-check matrix of an LDPC code.
//!
//! The matrix is stored both densely (for `connected` lookups and rendering) and as
//! adjacency lists in each direction, so the decoder walks only the edges of the
//! Tanner graph. Rows are check nodes, columns are variable nodes.

use crate::error::{Error, Result};
use bitvec::prelude::*;
use log::debug;

/// Binary sparsity structure connecting variable nodes and check nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParityCheckMatrix {
    /// Number of variable nodes (columns)
    n_v: usize,
    /// Number of check nodes (rows)
    n_c: usize,
    /// Dense copy of the matrix, `bits[c][v]`
    bits: Vec<BitVec>,
    /// For each check node, the connected variable nodes in ascending order
    check_to_var: Vec<Vec<usize>>,
    /// For each variable node, the connected check nodes in ascending order
    var_to_check: Vec<Vec<usize>>,
}

impl ParityCheckMatrix {
    /// Create a parity-check matrix from rows of booleans (true = 1, false = 0)
    ///
    /// # Arguments
    ///
    /// * `h_matrix` - One row per check node, one column per variable node
    ///
    /// # Returns
    ///
    /// The matrix, or `InvalidDimensions` if it is empty or not rectangular
    pub fn new(h_matrix: &[Vec<bool>]) -> Result<Self> {
        if h_matrix.is_empty() {
            return Err(Error::InvalidDimensions(
                "parity-check matrix has no rows".to_string(),
            ));
        }

        let n_c = h_matrix.len();
        let n_v = h_matrix[0].len();
        if n_v == 0 {
            return Err(Error::InvalidDimensions(
                "parity-check matrix has no columns".to_string(),
            ));
        }

        for (c, row) in h_matrix.iter().enumerate() {
            if row.len() != n_v {
                return Err(Error::InvalidDimensions(format!(
                    "row {} has {} columns, expected {}",
                    c,
                    row.len(),
                    n_v
                )));
            }
        }

        let mut bits = Vec::with_capacity(n_c);
        let mut check_to_var = vec![Vec::new(); n_c];
        let mut var_to_check = vec![Vec::new(); n_v];

        for (c, row) in h_matrix.iter().enumerate() {
            bits.push(row.iter().copied().collect::<BitVec>());
            for (v, &set) in row.iter().enumerate() {
                if set {
                    check_to_var[c].push(v);
                    var_to_check[v].push(c);
                }
            }
        }

        let matrix = ParityCheckMatrix {
            n_v,
            n_c,
            bits,
            check_to_var,
            var_to_check,
        };

        debug!(
            "parity-check matrix {}x{} with {} edges",
            n_c,
            n_v,
            matrix.edge_count()
        );
        let idle_checks = matrix.degenerate_checks();
        let idle_vars = matrix.degenerate_variables();
        if !idle_checks.is_empty() || !idle_vars.is_empty() {
            debug!(
                "unconstrained nodes: checks {:?}, variables {:?}",
                idle_checks, idle_vars
            );
        }

        Ok(matrix)
    }

    /// Create a parity-check matrix from a table of 0/1 values
    ///
    /// Any entry other than 0 or 1 is rejected with `InvalidInput`.
    pub fn from_binary(rows: &[Vec<u8>]) -> Result<Self> {
        let mut h_matrix = Vec::with_capacity(rows.len());
        for (c, row) in rows.iter().enumerate() {
            let mut bool_row = Vec::with_capacity(row.len());
            for (v, &entry) in row.iter().enumerate() {
                match entry {
                    0 => bool_row.push(false),
                    1 => bool_row.push(true),
                    other => {
                        return Err(Error::InvalidInput(format!(
                            "entry ({}, {}) is {}, expected 0 or 1",
                            c, v, other
                        )))
                    }
                }
            }
            h_matrix.push(bool_row);
        }
        Self::new(&h_matrix)
    }

    /// The 4x6 matrix of example 2.5 in Sarah J. Johnson,
    /// "Introducing Low-Density Parity-Check Codes"
    pub fn reference() -> Self {
        // Rectangular and binary, so construction cannot fail
        Self::from_binary(&[
            vec![1, 1, 0, 1, 0, 0],
            vec![0, 1, 1, 0, 1, 0],
            vec![1, 0, 0, 0, 1, 1],
            vec![0, 0, 1, 1, 0, 1],
        ])
        .expect("reference matrix is well formed")
    }

    /// Number of variable nodes (codeword length)
    pub fn n_v(&self) -> usize {
        self.n_v
    }

    /// Number of check nodes (parity constraints)
    pub fn n_c(&self) -> usize {
        self.n_c
    }

    /// Whether check `c` constrains variable `v`; false for indices out of range
    pub fn connected(&self, c: usize, v: usize) -> bool {
        self.bits
            .get(c)
            .and_then(|row| row.get(v).map(|bit| *bit))
            .unwrap_or(false)
    }

    /// Variable nodes connected to check `c`, ascending
    pub fn variables_of(&self, c: usize) -> impl Iterator<Item = usize> + '_ {
        self.check_to_var
            .get(c)
            .map(|vars| vars.as_slice())
            .unwrap_or(&[])
            .iter()
            .copied()
    }

    /// Check nodes connected to variable `v`, ascending
    pub fn checks_of(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.var_to_check
            .get(v)
            .map(|checks| checks.as_slice())
            .unwrap_or(&[])
            .iter()
            .copied()
    }

    /// Every edge `(c, v)` in row-major order
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.check_to_var
            .iter()
            .enumerate()
            .flat_map(|(c, vars)| vars.iter().map(move |&v| (c, v)))
    }

    /// Number of set entries
    pub fn edge_count(&self) -> usize {
        self.check_to_var.iter().map(Vec::len).sum()
    }

    /// Checks with no connected variables
    pub fn degenerate_checks(&self) -> Vec<usize> {
        (0..self.n_c)
            .filter(|&c| self.check_to_var[c].is_empty())
            .collect()
    }

    /// Variables no check constrains
    pub fn degenerate_variables(&self) -> Vec<usize> {
        (0..self.n_v)
            .filter(|&v| self.var_to_check[v].is_empty())
            .collect()
    }

    /// Parity residual of every check for a hard-decision vector
    pub fn syndrome(&self, bits: &BitSlice) -> Result<BitVec> {
        if bits.len() != self.n_v {
            return Err(Error::InvalidDimensions(format!(
                "hard decisions have {} bits, matrix has {} variables",
                bits.len(),
                self.n_v
            )));
        }

        Ok(self
            .check_to_var
            .iter()
            .map(|vars| vars.iter().fold(false, |parity, &v| parity ^ bits[v]))
            .collect())
    }

    /// Whether a hard-decision vector satisfies every parity check
    pub fn is_codeword(&self, bits: &BitSlice) -> Result<bool> {
        Ok(self.syndrome(bits)?.not_any())
    }
}
