//! Property tests over random operation sequences.

use proptest::prelude::*;

use nws_history::History;

#[derive(Debug, Clone, Copy)]
enum Op {
    Replace(i32),
    Undo,
    Redo,
    Reset(i32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::Replace),
        2 => Just(Op::Undo),
        2 => Just(Op::Redo),
        1 => any::<i32>().prop_map(Op::Reset),
    ]
}

proptest! {
    /// The depth bound holds no matter what sequence of operations runs.
    #[test]
    fn depth_bound_always_holds(
        limit in 1usize..10,
        ops in prop::collection::vec(op_strategy(), 0..200),
    ) {
        let mut history = History::with_limit(0, limit);
        for op in ops {
            match op {
                Op::Replace(v) => { history.replace(v); }
                Op::Undo => { history.undo(); }
                Op::Redo => { history.redo(); }
                Op::Reset(v) => { history.reset(v); }
            }
            prop_assert!(history.undo_depth() <= limit);
            prop_assert_eq!(history.can_undo(), history.undo_depth() > 0);
            prop_assert_eq!(history.can_redo(), history.redo_depth() > 0);
        }
    }

    /// Undoing everything lands on the oldest retained value, and redoing
    /// everything returns to the newest.
    #[test]
    fn full_undo_redo_round_trip(
        values in prop::collection::vec(any::<i32>(), 1..100),
    ) {
        let mut history = History::new(i64::from(i32::MAX) + 1);
        let mut effective = 0usize;
        for v in &values {
            if history.replace(i64::from(*v)) {
                effective += 1;
            }
        }
        let newest = *history.present();
        let retained = effective.min(history.limit());
        prop_assert_eq!(history.undo_depth(), retained);

        let mut undone = 0;
        while history.undo() {
            undone += 1;
        }
        prop_assert_eq!(undone, retained);

        let mut redone = 0;
        while history.redo() {
            redone += 1;
        }
        prop_assert_eq!(redone, retained);
        prop_assert_eq!(*history.present(), newest);
    }

    /// The present mirrors exactly what a naive last-write-wins model says
    /// it should, whatever the interleaving.
    #[test]
    fn present_is_authoritative(
        ops in prop::collection::vec(op_strategy(), 0..200),
    ) {
        let mut history = History::new(0);
        // Shadow model: a plain vec of committed states plus a cursor.
        let mut states = vec![0_i32];
        let mut cursor = 0usize;
        for op in ops {
            match op {
                Op::Replace(v) => {
                    if v != states[cursor] {
                        states.truncate(cursor + 1);
                        states.push(v);
                        cursor += 1;
                    }
                }
                Op::Undo => {
                    // The model is unbounded; only step where the bounded
                    // history can follow.
                    if history.can_undo() {
                        cursor -= 1;
                    }
                    history.undo();
                    prop_assert_eq!(*history.present(), states[cursor]);
                    continue;
                }
                Op::Redo => {
                    if history.can_redo() {
                        cursor += 1;
                    }
                    history.redo();
                    prop_assert_eq!(*history.present(), states[cursor]);
                    continue;
                }
                Op::Reset(v) => {
                    states = vec![v];
                    cursor = 0;
                }
            }
            match op {
                Op::Replace(v) => { history.replace(v); }
                Op::Reset(v) => { history.reset(v); }
                _ => unreachable!(),
            }
            prop_assert_eq!(*history.present(), states[cursor]);
        }
    }
}
