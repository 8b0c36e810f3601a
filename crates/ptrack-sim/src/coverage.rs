//! The coverage metric.

use std::fmt;

/// Summary of a run's target coverage.
///
/// `observed_ticks` accumulates, every tick, the number of targets within
/// sensing range of at least one robot.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CoverageReport {
    pub observed_ticks: u64,
    pub ticks_run:      u64,
    pub duration_secs:  f64,
    pub target_count:   usize,
}

impl CoverageReport {
    /// `observed_ticks / T`, further divided by the target count when
    /// `normalize` is set and there is at least one target.
    pub fn average_observations(&self, normalize: bool) -> f64 {
        let average = self.observed_ticks as f64 / self.duration_secs;
        if normalize && self.target_count > 0 {
            average / self.target_count as f64
        } else {
            average
        }
    }

    #[inline]
    pub fn raw_average(&self) -> f64 {
        self.average_observations(false)
    }

    #[inline]
    pub fn normalized_average(&self) -> f64 {
        self.average_observations(true)
    }
}

impl fmt::Display for CoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "observed {} target-ticks over {} ticks: average {:.4}, normalized {:.4}",
            self.observed_ticks,
            self.ticks_run,
            self.raw_average(),
            self.normalized_average()
        )
    }
}
