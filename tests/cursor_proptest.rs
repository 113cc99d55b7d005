use chained_collections::cursor::{range, repeat, SliceCursor};
use chained_collections::{Cursor, CursorExt};
use proptest::prelude::*;

// Length laws for the windowing and combining combinators, checked against
// plain arithmetic over arbitrary bounds.
proptest! {
    #[test]
    fn prop_take_yields_min(len in 0i64..200, n in 0usize..300) {
        let mut c = range(0, len, 1).unwrap().take(n);
        prop_assert_eq!(c.count_remaining().unwrap(), n.min(len as usize));
    }

    #[test]
    fn prop_skip_take_window(len in 0i64..200, n in 0usize..250, m in 0usize..250) {
        let got = range(0, len, 1).unwrap().skip(n).take(m).collect_vec().unwrap();
        let lo = (n as i64).min(len);
        let hi = (n as i64 + m as i64).min(len);
        prop_assert_eq!(got, (lo..hi).collect::<Vec<_>>());
    }

    #[test]
    fn prop_chain_length_is_sum(a in 0i64..100, b in 0usize..100) {
        let mut c = range(0, a, 1).unwrap().chain(repeat(-1i64, Some(b)));
        prop_assert_eq!(c.count_remaining().unwrap(), a as usize + b);
    }

    #[test]
    fn prop_zip_length_is_min(a in proptest::collection::vec(any::<u8>(), 0..60), b in 0i64..80) {
        let mut c = SliceCursor::new(&a).zip(range(0, b, 1).unwrap());
        prop_assert_eq!(c.count_remaining().unwrap(), a.len().min(b as usize));
    }

    // Stepping back over everything a forward drain produced replays it in
    // reverse, whatever the step.
    #[test]
    fn prop_range_prev_mirrors_next(start in -1000i64..1000, len in 0i64..50, step in 1i64..7, neg in any::<bool>()) {
        let step = if neg { -step } else { step };
        let mut c = range(start, start + step * len, step).unwrap();
        let forward = c.collect_vec().unwrap();
        prop_assert_eq!(forward.len() as i64, len);
        let mut backward = Vec::new();
        while c.has_prev() {
            backward.push(c.prev().unwrap());
        }
        backward.reverse();
        prop_assert_eq!(forward, backward);
    }
}
