//! Property tests for cross-run recording comparison

use faultcheck_checker::{CallSite, Fault, Operation};
use faultcheck_testing::{Recording, Site, TrackError};
use proptest::prelude::*;

fn sites_strategy() -> impl Strategy<Value = Vec<(usize, u32)>> {
    prop::collection::vec((0usize..6, 1u32..500), 1..16)
}

fn build(shape: &[(usize, u32)], error_at: Option<usize>) -> Recording {
    let ops = Operation::all();
    Recording::from_sites(
        shape
            .iter()
            .enumerate()
            .map(|(i, &(op, line))| {
                let error = (error_at == Some(i)).then(|| Fault::msg(format!("failed at {}", i)));
                Site::new(ops[op], CallSite::new("app/src/lib.rs", line, 1), error)
            })
            .collect(),
    )
}

proptest! {
    #[test]
    fn prop_identical_merge_is_noop(shape in sites_strategy()) {
        let mut master = build(&shape, None);
        let candidate = master.clone();
        prop_assert!(master.track_errors(&candidate).is_ok());
        prop_assert_eq!(&master, &candidate);
    }

    #[test]
    fn prop_longer_candidate_rejected(shape in sites_strategy(), cut in 1usize..16) {
        let cut = cut.min(shape.len());
        let mut master = build(&shape[..shape.len() - cut], None);
        let candidate = build(&shape, None);
        prop_assert_eq!(
            master.track_errors(&candidate),
            Err(TrackError::LengthMismatch { candidate: shape.len(), master: shape.len() - cut })
        );
    }

    #[test]
    fn prop_divergence_reported_at_first_position(
        (shape, k) in sites_strategy().prop_flat_map(|s| { let n = s.len(); (Just(s), 0..n) }),
        bump_op in any::<bool>(),
    ) {
        let mut master = build(&shape, None);
        let mut changed = shape[..=k].to_vec();
        if bump_op {
            changed[k].0 = (changed[k].0 + 1) % 6;
        } else {
            changed[k].1 += 1000;
        }
        let before = master.clone();
        prop_assert_eq!(
            master.track_errors(&build(&changed, Some(k))),
            Err(TrackError::PositionMismatch { index: k })
        );
        prop_assert_eq!(master, before);
    }

    #[test]
    fn prop_all_errors_seen_after_last_slot(
        (shape, order) in sites_strategy().prop_flat_map(|s| {
            let n = s.len();
            (Just(s), Just((0..n).collect::<Vec<_>>()).prop_shuffle())
        }),
    ) {
        let mut master = build(&shape, None);
        for (merged, &index) in order.iter().enumerate() {
            prop_assert!(!master.all_errors_seen());
            master.track_errors(&build(&shape[..=index], Some(index))).unwrap();
            prop_assert_eq!(master.uncovered().len(), shape.len() - merged - 1);
        }
        prop_assert!(master.all_errors_seen());
    }
}
