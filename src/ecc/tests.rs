use crate::ecc::{
    l_to_p, p_to_l, ChannelModel, Direction, ParityCheckMatrix, Session, SumProductEngine,
    REFERENCE_LLRS,
};
use approx::assert_abs_diff_eq;
use bitvec::prelude::*;

#[test]
fn test_reference_channel() {
    let session = Session::reference().unwrap();
    let channel = session.channel();

    assert_abs_diff_eq!(channel.probability(0).unwrap(), 0.3775, epsilon = 1e-4);
    assert_abs_diff_eq!(channel.probability(0).unwrap(), l_to_p(-0.5), epsilon = 1e-15);
    assert_abs_diff_eq!(channel.llr(0).unwrap(), -0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(p_to_l(l_to_p(-0.5)), -0.5, epsilon = 1e-9);

    // l_to_p(5.0) is above the ceiling
    assert_eq!(channel.probability(3).unwrap(), 0.99);
    for v in [0, 1, 2, 4, 5] {
        assert_abs_diff_eq!(channel.llr(v).unwrap(), REFERENCE_LLRS[v], epsilon = 1e-9);
    }
}

#[test]
fn test_reference_first_iteration_is_broadcast() {
    let session = Session::reference().unwrap();
    let first = session.trace().at(0).unwrap();
    let llr0 = session.trace().channel_llr()[0];

    assert_abs_diff_eq!(llr0, -0.5, epsilon = 1e-9);
    for c in session.matrix().checks_of(0) {
        assert_eq!(first.c2v(c, 0), Some(llr0));
    }
    assert_eq!(session.matrix().checks_of(0).collect::<Vec<_>>(), vec![0, 2]);
}

#[test]
fn test_reference_decodes() {
    let session = Session::reference().unwrap();
    let trace = session.trace();

    assert_eq!(trace.len(), 8);
    assert!(!trace.has_warnings());

    assert_eq!(trace.at(0).unwrap().bits(), bits![1, 0, 1, 0, 1, 1]);
    assert_eq!(trace.at(0).unwrap().syndrome(), bits![1, 0, 1, 0]);
    assert_eq!(trace.at(1).unwrap().bits(), bits![0, 0, 1, 1, 1, 1]);
    assert_eq!(trace.at(1).unwrap().syndrome(), bits![1, 0, 0, 1]);

    for k in 2..8 {
        let it = trace.at(k).unwrap();
        assert_eq!(it.bits(), bits![0, 0, 1, 0, 1, 1]);
        assert!(it.is_valid());
        assert!(session.is_valid(k).unwrap());
    }
    assert_eq!(trace.first_valid(), Some(2));
    assert!(trace.last().unwrap().is_valid());
}

#[test]
fn test_reference_marginals() {
    let session = Session::reference().unwrap();
    let first = session.trace().at(0).unwrap();
    let expected = [-0.3044, 5.0369, -3.8044, 1.8734, -6.2217, -0.5914];
    for (l, e) in first.marginals().iter().zip(expected) {
        assert_abs_diff_eq!(*l, e, epsilon = 1e-4);
    }
}

#[test]
fn test_reference_reproducible() {
    let a = Session::reference().unwrap();
    let b = Session::reference().unwrap();
    assert_eq!(a.trace(), b.trace());
    assert_eq!(
        a.trace().last().unwrap().syndrome(),
        b.trace().last().unwrap().syndrome()
    );

    let engine = SumProductEngine::new();
    let again = engine.resolve(a.matrix(), a.channel()).unwrap();
    assert_eq!(&again, a.trace());
}

#[test]
fn test_syndrome_matches_matrix() {
    let mut session = Session::reference().unwrap();
    for v in 0..6 {
        for _ in 0..30 {
            session.adjust_probability(v, Direction::Decrease).unwrap();
        }
        for it in session.trace() {
            assert_eq!(
                session.matrix().syndrome(it.bits()).unwrap(),
                it.syndrome().to_bitvec()
            );
        }
    }
}

#[test]
fn test_oscillation_is_kept() {
    // Every row has weight 3, so all-ones is not a codeword
    let matrix = ParityCheckMatrix::reference();
    let channel = ChannelModel::from_probabilities(6, &[0.01; 6]).unwrap();
    let trace = SumProductEngine::new().resolve(&matrix, &channel).unwrap();

    assert_eq!(trace.len(), 8);
    assert_eq!(trace.first_valid(), Some(0));
    for (k, it) in trace.iter().enumerate() {
        if k % 2 == 0 {
            assert!(it.bits().not_any());
            assert!(it.is_valid());
        } else {
            assert!(it.bits().all());
            assert!(it.syndrome().all());
        }
    }
    assert!(!trace.last().unwrap().is_valid());
}
