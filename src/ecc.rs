//! Sum-product decoding of LDPC codes, one inspectable iteration at a time.
//!
//! The pieces, leaves first:
//! - [`ParityCheckMatrix`]: the Tanner graph of the code
//! - [`ChannelModel`]: prior probability of each bit, the only mutable input
//! - [`Iteration`]: messages, marginals, hard decisions and syndrome of one round
//! - [`DecodeTrace`]: every iteration of one run, in order
//! - [`SumProductEngine`]: runs the update rules and fills a trace
//! - [`Session`]: owns all of the above and reruns the engine after each edit
//!
//! # Examples
//!
//! ```rust
//! use ldpc_demo::ecc::{Direction, Session};
//!
//! let mut session = Session::reference().unwrap();
//! assert_eq!(session.trace().len(), 8);
//! assert!(session.is_valid(7).unwrap());
//!
//! session.adjust_probability(3, Direction::Decrease).unwrap();
//! assert_eq!(session.channel().probability(3).unwrap(), 0.98);
//! ```

pub mod channel;
pub mod iteration;
pub mod parity_check;
pub mod session;
pub mod sum_product;
pub mod trace;

#[cfg(test)]
mod tests;

pub use channel::{
    l_to_p, p_to_l, ChannelModel, Direction, Prior, DEFAULT_PROBABILITY, MAX_PROBABILITY,
    MIN_PROBABILITY, PROBABILITY_STEP,
};
pub use iteration::{Iteration, NumericDomainWarning};
pub use parity_check::ParityCheckMatrix;
pub use session::{Session, REFERENCE_LLRS};
pub use sum_product::{SumProductEngine, DEFAULT_ITERATIONS};
pub use trace::DecodeTrace;
