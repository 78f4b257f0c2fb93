//! Net Present Value and its rate derivative

/// NPV of `cash_flows` at a periodic `rate`
///
/// Period 0 is undiscounted: `Σ cf[t] / (1 + rate)^t`
pub fn npv(cash_flows: &[f64], rate: f64) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// Calculate NPV and its derivative with respect to rate in a single pass
///
/// The derivative is `Σ -t * cf[t] / (1 + rate)^(t + 1)`; period 0 contributes nothing.
pub fn npv_and_derivative(cash_flows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cash_flows.iter().enumerate() {
        npv += cf / (1.0 + rate).powi(t as i32);
        if t > 0 {
            dnpv -= (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }

    (npv, dnpv)
}

/// Convert a periodic rate to an effective annual rate
///
/// e.g. a monthly IRR with `periods_per_year = 12`
pub fn annualize(periodic_rate: f64, periods_per_year: u32) -> f64 {
    (1.0 + periodic_rate).powf(periods_per_year as f64) - 1.0
}
