use super::{BlockIndexEntry, Checkpoints};

/// Relative cost of verifying a transaction past the last checkpoint.
pub const SIGCHECK_VERIFICATION_FACTOR: f64 = 5.0;

const SECONDS_PER_DAY: f64 = 86400.0;

impl Checkpoints {
    /// Estimated fraction of verification work done once `node` is connected.
    pub fn guess_verification_progress<N: BlockIndexEntry>(&self, node: Option<&N>, sigchecks: bool) -> f64 {
        self.guess_verification_progress_at(node, sigchecks, chrono::Utc::now().timestamp())
    }

    /// Same as [`Checkpoints::guess_verification_progress`] with an explicit
    /// current time.
    ///
    /// Work is one unit per transaction up to the last checkpoint and
    /// `SIGCHECK_VERIFICATION_FACTOR` units (when signatures are checked) per
    /// transaction after it.
    ///
    /// The estimate only grows with `chain_tx` while `node.time()` is at or
    /// after the last checkpoint's time. Past the checkpoint, remaining work
    /// is projected from the node's own timestamp, so a node with a stale
    /// timestamp can report less progress than one with fewer transactions.
    /// Out-of-range timestamps saturate rather than overflow.
    pub fn guess_verification_progress_at<N: BlockIndexEntry>(
        &self,
        node: Option<&N>,
        sigchecks: bool,
        now: i64,
    ) -> f64 {
        let node = match node {
            Some(node) => node,
            None => return 0.0,
        };

        let factor = if sigchecks { SIGCHECK_VERIFICATION_FACTOR } else { 1.0 };
        let data = self.data();
        let chain_tx = node.chain_tx();
        let checkpoint_tx = data.transactions_last_checkpoint;

        let (work_before, work_after) = if chain_tx <= checkpoint_tx {
            let cheap_before = chain_tx as f64;
            let cheap_after = (checkpoint_tx - chain_tx) as f64;
            let expensive_after = days_since(data.time_last_checkpoint, now) * data.transactions_per_day;
            (cheap_before, cheap_after + expensive_after * factor)
        } else {
            let cheap_before = checkpoint_tx as f64;
            let expensive_before = (chain_tx - checkpoint_tx) as f64;
            let expensive_after = days_since(node.time(), now) * data.transactions_per_day;
            (cheap_before + expensive_before * factor, expensive_after * factor)
        };

        let total = work_before + work_after;
        if total <= 0.0 {
            return 0.0;
        }
        (work_before / total).clamp(0.0, 1.0)
    }
}

/// Days between `then` and `now`; a clock behind `then` counts as zero.
fn days_since(then: i64, now: i64) -> f64 {
    now.saturating_sub(then).max(0) as f64 / SECONDS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chainparams::{registry, NetworkId};

    struct Entry {
        chain_tx: u64,
        time: i64,
    }

    impl BlockIndexEntry for Entry {
        fn chain_tx(&self) -> u64 {
            self.chain_tx
        }

        fn time(&self) -> i64 {
            self.time
        }
    }

    fn main_store() -> Checkpoints {
        Checkpoints::new(registry().unwrap().get(NetworkId::Main))
    }

    #[test]
    fn test_no_node_is_zero() {
        let store = main_store();
        assert_eq!(store.guess_verification_progress::<Entry>(None, true), 0.0);
    }

    #[test]
    fn test_before_checkpoint() {
        let store = main_store();
        let data = store.data();
        let now = data.time_last_checkpoint + 86400;
        let node = Entry {
            chain_tx: 40_000,
            time: data.time_last_checkpoint - 1000,
        };
        // 40000 / (81609 + 1 day * 1450 * 5)
        let expected = 40_000.0 / (81_609.0 + 1450.0 * 5.0);
        let got = store.guess_verification_progress_at(Some(&node), true, now);
        assert!((got - expected).abs() < 1e-12);
    }

    #[test]
    fn test_after_checkpoint_without_sigchecks() {
        let store = main_store();
        let data = store.data();
        let node = Entry {
            chain_tx: 81_609 + 1_000,
            time: data.time_last_checkpoint + 10 * 86400,
        };
        let now = node.time + 2 * 86400;
        let expected = 82_609.0 / (82_609.0 + 2.0 * 1450.0);
        let got = store.guess_verification_progress_at(Some(&node), false, now);
        assert!((got - expected).abs() < 1e-12);
    }

    #[test]
    fn test_tip_is_complete() {
        let store = main_store();
        let node = Entry {
            chain_tx: 100_000,
            time: 1_500_000_000,
        };
        assert_eq!(store.guess_verification_progress_at(Some(&node), true, node.time), 1.0);
    }

    #[test]
    fn test_clock_behind_checkpoint_stays_in_range() {
        let store = main_store();
        let node = Entry { chain_tx: 10, time: 0 };
        let got = store.guess_verification_progress_at(Some(&node), true, 0);
        assert!((0.0..=1.0).contains(&got));
    }

    #[test]
    fn test_extreme_timestamps_stay_in_range() {
        let store = main_store();
        let now = 1_700_000_000;
        for time in [i64::MIN, i64::MAX] {
            for chain_tx in [10, 100_000] {
                let node = Entry { chain_tx, time };
                let got = store.guess_verification_progress_at(Some(&node), true, now);
                assert!((0.0..=1.0).contains(&got), "time {} chain_tx {}", time, chain_tx);
            }
        }
        let ancient = Entry {
            chain_tx: 100_000,
            time: i64::MIN,
        };
        assert!(store.guess_verification_progress_at(Some(&ancient), true, i64::MAX) < 1.0);
        assert_eq!(store.guess_verification_progress_at(Some(&ancient), true, i64::MIN), 1.0);
    }

    #[test]
    fn test_stale_timestamp_past_checkpoint_drops_progress() {
        let store = main_store();
        let data = store.data();
        let now = data.time_last_checkpoint + 30 * 86400;
        let at_checkpoint = Entry {
            chain_tx: data.transactions_last_checkpoint,
            time: data.time_last_checkpoint,
        };
        let stale = Entry {
            chain_tx: data.transactions_last_checkpoint + 1,
            time: data.time_last_checkpoint - 100 * 86400,
        };
        let fresh = Entry {
            chain_tx: data.transactions_last_checkpoint + 1,
            time: data.time_last_checkpoint,
        };
        let base = store.guess_verification_progress_at(Some(&at_checkpoint), true, now);
        assert!((base - 81_609.0 / (81_609.0 + 30.0 * 1450.0 * 5.0)).abs() < 1e-12);
        assert!(store.guess_verification_progress_at(Some(&stale), true, now) < base);
        assert!(store.guess_verification_progress_at(Some(&fresh), true, now) >= base);
    }

    #[test]
    fn test_empty_regtest_chain() {
        let store = Checkpoints::new(registry().unwrap().get(NetworkId::Regtest));
        let genesis_only = Entry { chain_tx: 0, time: 0 };
        assert_eq!(store.guess_verification_progress_at(Some(&genesis_only), true, 1_000), 0.0);
        let mined = Entry { chain_tx: 3, time: 0 };
        assert_eq!(store.guess_verification_progress_at(Some(&mined), true, 1_000), 1.0);
    }
}
