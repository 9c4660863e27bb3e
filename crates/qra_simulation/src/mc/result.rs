//! Simulation results.

use qra_core::types::RiskId;

use super::method::SimulationMethod;

/// Simulated annual outcomes of one risk over `N` years.
///
/// `frequency`, `occurrences`, `single_risk_impact` and `total` have
/// length `N`; `impact` has one entry per occurrence, years laid out
/// consecutively, so `impact.len() == occurrences.iter().sum()`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskOutcome {
    /// Risk identifier.
    pub id: RiskId,
    /// Drawn occurrence rate per year.
    pub frequency: Vec<f64>,
    /// Occurrence count per year.
    pub occurrences: Vec<u64>,
    /// Impact of every occurrence, flattened across years.
    pub impact: Vec<f64>,
    /// One impact draw per year, independent of the count.
    pub single_risk_impact: Vec<f64>,
    /// Summed impact per year.
    pub total: Vec<f64>,
}

impl RiskOutcome {
    /// Number of simulated years.
    #[inline]
    pub fn n_years(&self) -> usize {
        self.total.len()
    }

    /// Iterates `(occurrences, impacts)` per year.
    ///
    /// # Examples
    ///
    /// ```
    /// use qra_core::types::RiskId;
    /// use qra_simulation::mc::RiskOutcome;
    ///
    /// let outcome = RiskOutcome {
    ///     id: RiskId::new("R1"),
    ///     frequency: vec![1.0, 1.0],
    ///     occurrences: vec![2, 0],
    ///     impact: vec![5.0, 7.0],
    ///     single_risk_impact: vec![6.0, 6.0],
    ///     total: vec![12.0, 0.0],
    /// };
    /// let years: Vec<_> = outcome.years().collect();
    /// assert_eq!(years[0], (2, &[5.0, 7.0][..]));
    /// assert!(years[1].1.is_empty());
    /// ```
    pub fn years(&self) -> Years<'_> {
        Years {
            occurrences: self.occurrences.iter(),
            rest: &self.impact,
        }
    }

    /// Mean annual total.
    pub fn mean_total(&self) -> f64 {
        qra_core::math::statistics::mean(&self.total)
    }

    /// Mean annual occurrence count.
    pub fn mean_occurrences(&self) -> f64 {
        if self.occurrences.is_empty() {
            return 0.0;
        }
        self.occurrences.iter().map(|&k| k as f64).sum::<f64>() / self.occurrences.len() as f64
    }
}

/// Iterator over the years of a [`RiskOutcome`].
#[derive(Clone, Debug)]
pub struct Years<'a> {
    occurrences: std::slice::Iter<'a, u64>,
    rest: &'a [f64],
}

impl<'a> Iterator for Years<'a> {
    type Item = (u64, &'a [f64]);

    fn next(&mut self) -> Option<Self::Item> {
        let &count = self.occurrences.next()?;
        let take = usize::try_from(count).map_or(self.rest.len(), |c| c.min(self.rest.len()));
        let (year, tail) = self.rest.split_at(take);
        self.rest = tail;
        Some((count, year))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.occurrences.size_hint()
    }
}

impl ExactSizeIterator for Years<'_> {}

/// Run metadata.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationSummary {
    /// Simulated years per risk.
    pub number_of_iterations: usize,
    /// Sampling method used.
    pub method: SimulationMethod,
    /// Base seed of the run.
    pub seed: u64,
    /// Risk ids in portfolio order.
    pub risk_ids: Vec<RiskId>,
}

/// Outcome of one simulation call.
///
/// `results[i]` belongs to the `i`-th risk of the portfolio.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationResult {
    /// Run metadata.
    pub summary: SimulationSummary,
    /// Per-risk outcomes in portfolio order.
    pub results: Vec<RiskOutcome>,
}

impl SimulationResult {
    /// Outcome of the risk with the given id.
    pub fn outcome(&self, id: impl AsRef<str>) -> Option<&RiskOutcome> {
        let id = id.as_ref();
        self.results.iter().find(|r| r.id.as_str() == id)
    }

    /// Number of simulated years.
    #[inline]
    pub fn n_iterations(&self) -> usize {
        self.summary.number_of_iterations
    }

    /// Sum of all risks' totals, per year.
    pub fn portfolio_total(&self) -> Vec<f64> {
        let mut total = vec![0.0; self.summary.number_of_iterations];
        for outcome in &self.results {
            for (acc, &t) in total.iter_mut().zip(&outcome.total) {
                *acc += t;
            }
        }
        total
    }
}
