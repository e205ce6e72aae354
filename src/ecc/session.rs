//! An interactive decoding session.
//!
//! A session ties a parity-check matrix, a channel model and an engine together
//! and keeps the trace of the latest run. Every probability adjustment reruns
//! the decoder from scratch and replaces the trace wholesale.

use crate::ecc::channel::{ChannelModel, Direction, Prior};
use crate::ecc::parity_check::ParityCheckMatrix;
use crate::ecc::sum_product::{SumProductEngine, DEFAULT_ITERATIONS};
use crate::ecc::trace::DecodeTrace;
use crate::error::Result;
use log::debug;
use std::fmt::Write;

/// Channel LLRs of example 2.23 in Sarah J. Johnson,
/// "Introducing Low-Density Parity-Check Codes"
pub const REFERENCE_LLRS: [f64; 6] = [-0.5, 2.5, -4.0, 5.0, -3.5, 2.5];

/// Decoder state shared with a presentation layer
#[derive(Debug, Clone)]
pub struct Session {
    matrix: ParityCheckMatrix,
    channel: ChannelModel,
    engine: SumProductEngine,
    trace: DecodeTrace,
}

impl Session {
    /// Build a session from a 0/1 table and leading priors, then decode
    ///
    /// # Arguments
    ///
    /// * `matrix_definition` - Rows are checks, columns are variables
    /// * `iteration_count` - Length of every trace this session produces
    /// * `initial` - Priors for the first variables; the rest start at 0.5
    pub fn construct(
        matrix_definition: &[Vec<u8>],
        iteration_count: usize,
        initial: &[Prior],
    ) -> Result<Self> {
        let matrix = ParityCheckMatrix::from_binary(matrix_definition)?;
        let channel = ChannelModel::from_priors(matrix.n_v(), initial.to_vec())?;
        let engine = SumProductEngine::new().with_iterations(iteration_count);
        Self::new(matrix, channel, engine)
    }

    /// Build a session from already validated parts, then decode
    pub fn new(
        matrix: ParityCheckMatrix,
        channel: ChannelModel,
        engine: SumProductEngine,
    ) -> Result<Self> {
        let trace = engine.resolve(&matrix, &channel)?;
        Ok(Session {
            matrix,
            channel,
            engine,
            trace,
        })
    }

    /// The worked example: Johnson's 4x6 matrix, its channel LLRs, 8 iterations
    pub fn reference() -> Result<Self> {
        let matrix = ParityCheckMatrix::reference();
        let channel = ChannelModel::from_llrs(matrix.n_v(), &REFERENCE_LLRS)?;
        Self::new(
            matrix,
            channel,
            SumProductEngine::new().with_iterations(DEFAULT_ITERATIONS),
        )
    }

    /// Move the probability of variable `v` one step and decode again
    ///
    /// On error the session is left untouched.
    pub fn adjust_probability(&mut self, v: usize, direction: Direction) -> Result<()> {
        let mut channel = self.channel.clone();
        channel.adjust(v, direction)?;
        let trace = self.engine.resolve(&self.matrix, &channel)?;

        debug!("variable {} adjusted ({:?}), trace replaced", v, direction);
        self.channel = channel;
        self.trace = trace;
        Ok(())
    }

    /// The trace of the latest run
    pub fn trace(&self) -> &DecodeTrace {
        &self.trace
    }

    /// Whether iteration `k` decoded to a codeword
    pub fn is_valid(&self, k: usize) -> Result<bool> {
        Ok(self.trace.at(k)?.is_valid())
    }

    pub fn matrix(&self) -> &ParityCheckMatrix {
        &self.matrix
    }

    pub fn channel(&self) -> &ChannelModel {
        &self.channel
    }

    /// Iterations every trace of this session holds
    pub fn iterations(&self) -> usize {
        self.engine.iterations()
    }

    /// Text view of the channel followed by iteration `k`
    pub fn render_page(&self, k: usize) -> Result<String> {
        let iteration = self.trace.at(k)?;
        let mut page = String::new();
        // Writing into a String cannot fail
        let _ = write!(
            page,
            "{}\nIteration {} of {}:\n{}",
            self.channel,
            k + 1,
            self.trace.len(),
            iteration
        );
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_construct() {
        let session = Session::construct(
            &[vec![1, 1, 0], vec![0, 1, 1]],
            5,
            &[Prior::Llr(1.0), Prior::Probability(0.2)],
        )
        .unwrap();

        assert_eq!(session.iterations(), 5);
        assert_eq!(session.trace().len(), 5);
        assert_eq!(session.channel().probability(1).unwrap(), 0.2);
        assert_eq!(session.channel().probability(2).unwrap(), 0.5);
        assert_eq!(session.matrix().n_c(), 2);
    }

    #[test]
    fn test_construct_errors() {
        assert!(matches!(
            Session::construct(&[], 8, &[]),
            Err(Error::InvalidDimensions(_))
        ));
        assert!(matches!(
            Session::construct(&[vec![1, 0], vec![1]], 8, &[]),
            Err(Error::InvalidDimensions(_))
        ));
        assert!(matches!(
            Session::construct(&[vec![1, 1]], 8, &[Prior::Llr(0.0); 3]),
            Err(Error::InvalidDimensions(_))
        ));
        assert!(matches!(
            Session::construct(&[vec![1, 1]], 0, &[]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_adjust_replaces_trace() {
        let mut session = Session::reference().unwrap();
        let before = session.trace().clone();

        session.adjust_probability(0, Direction::Increase).unwrap();
        assert_eq!(session.channel().probability(0).unwrap(), 0.38);
        assert_ne!(session.trace(), &before);
        assert_eq!(session.trace().len(), before.len());
        assert_eq!(session.trace().channel_llr(), session.channel().llrs().as_slice());

        session.adjust_probability(0, Direction::Decrease).unwrap();
        session.adjust_probability(0, Direction::Decrease).unwrap();
        assert_eq!(session.channel().probability(0).unwrap(), 0.36);
    }

    #[test]
    fn test_adjust_unknown_variable_leaves_session() {
        let mut session = Session::reference().unwrap();
        let before = session.trace().clone();
        let result = session.adjust_probability(6, Direction::Increase);

        assert!(matches!(
            result,
            Err(Error::IndexOutOfRange { index: 6, len: 6, .. })
        ));
        assert_eq!(session.trace(), &before);
    }

    #[test]
    fn test_is_valid_bounds() {
        let session = Session::reference().unwrap();
        assert!(!session.is_valid(0).unwrap());
        assert!(session.is_valid(7).unwrap());
        assert!(session.is_valid(8).is_err());
    }

    #[test]
    fn test_render_page() {
        let session = Session::reference().unwrap();
        let page = session.render_page(0).unwrap();

        assert!(page.starts_with("Channel\n 0.3775 "));
        assert!(page.contains("Iteration 1 of 8:"));
        assert!(page.contains("Check-to-variable messages:\n-0.5000  2.5000         "));
        assert!(page.contains("Codeword:\n1 0 1 0 1 1 \n"));
        assert!(page.contains("Parity:\n1 0 1 0 \n"));
        assert!(page.contains("Invalid codeword"));

        let last = session.render_page(7).unwrap();
        assert!(last.contains("Iteration 8 of 8:"));
        assert!(last.contains("Valid codeword"));
        assert!(!last.contains("Invalid"));

        assert!(session.render_page(8).is_err());
    }
}
