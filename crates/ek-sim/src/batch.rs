use ek_script::BossScript;

use crate::error::SimResult;
use crate::observer::NoopObserver;
use crate::runner::{EncounterRunner, RunReport};

/// Runs one headless attempt per seed and returns the reports in seed
/// order.
///
/// `setup` builds a fresh runner for each seed. With the `parallel`
/// feature enabled the seeds are spread over Rayon's thread pool, so the
/// closure may be called from worker threads; report order still matches
/// `seeds`. The first error aborts the batch.
pub fn run_batch<S, F>(seeds: &[u64], setup: F) -> SimResult<Vec<RunReport>>
where
    S: BossScript,
    F: Fn(u64) -> SimResult<EncounterRunner<S>> + Sync,
{
    #[cfg(not(feature = "parallel"))]
    {
        seeds
            .iter()
            .map(|&seed| {
                let mut runner = setup(seed)?;
                runner.run(&mut NoopObserver)
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        seeds
            .par_iter()
            .map(|&seed| {
                let mut runner = setup(seed)?;
                runner.run(&mut NoopObserver)
            })
            .collect()
    }
}
