//! Running balances of a loan during amortization

/// State of a loan at a point in time during amortization
#[derive(Debug, Clone)]
pub(crate) struct AmortizationState {
    /// Current month (1-indexed, 0 before the first month)
    pub month: u32,

    /// Outstanding principal after the current month
    pub remaining_principal: f64,

    pub cumulative_principal: f64,
    pub cumulative_interest: f64,
    pub cumulative_insurance: f64,
}

impl AmortizationState {
    /// Initialize state at loan start
    pub fn new(principal: f64) -> Self {
        Self {
            month: 0,
            remaining_principal: principal,
            cumulative_principal: 0.0,
            cumulative_interest: 0.0,
            cumulative_insurance: 0.0,
        }
    }

    /// Advance to next month
    pub fn advance_month(&mut self) {
        self.month += 1;
    }

    /// Relative loan year of the current month
    pub fn year(&self) -> u32 {
        self.month.div_ceil(12)
    }

    /// Book one month's flows
    ///
    /// Remaining principal is clamped to zero once it drops below `tolerance`.
    pub fn apply(&mut self, principal_portion: f64, interest: f64, insurance: f64, tolerance: f64) {
        self.cumulative_interest += interest;

        self.remaining_principal -= principal_portion;
        if self.remaining_principal < tolerance {
            self.remaining_principal = 0.0;
        }

        self.cumulative_principal += principal_portion;
        self.cumulative_insurance += insurance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_label() {
        let mut state = AmortizationState::new(1_000.0);
        let mut years = Vec::new();
        for _ in 0..25 {
            state.advance_month();
            years.push(state.year());
        }
        assert_eq!(years[0], 1);
        assert_eq!(years[11], 1);
        assert_eq!(years[12], 2);
        assert_eq!(years[24], 3);
    }

    #[test]
    fn test_dust_clamped() {
        let mut state = AmortizationState::new(100.0);
        state.advance_month();
        state.apply(99.995, 1.0, 0.5, 0.01);
        assert_eq!(state.remaining_principal, 0.0);
        assert_eq!(state.cumulative_principal, 99.995);
        assert_eq!(state.cumulative_interest, 1.0);
        assert_eq!(state.cumulative_insurance, 0.5);
    }
}
