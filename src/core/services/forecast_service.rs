//! Linear-trend projections of monthly income and expenses.

use crate::domain::{
    ExpensePoint, ExpenseTrend, IncomeForecast, IncomePoint, ModelInfo, MonthlyTotal,
};
use crate::ledger::Ledger;
use crate::utils::round_to;

const MIN_HISTORY_MONTHS: usize = 2;

pub struct ForecastService;

impl ForecastService {
    /// Projects monthly income `months_ahead` months past the observed
    /// history, with diagnostics for the fitted line. Predictions are
    /// clamped at zero before rounding.
    pub fn income_forecast(ledger: &Ledger, months_ahead: u32) -> IncomeForecast {
        let totals = ledger.monthly_income_totals();
        let history: Vec<MonthlyTotal> = totals
            .iter()
            .map(|(month, total)| MonthlyTotal::new(month.to_string(), *total))
            .collect();

        if totals.len() < MIN_HISTORY_MONTHS {
            return IncomeForecast {
                error: Some(
                    "Not enough data for prediction. Need at least 2 months of income data."
                        .into(),
                ),
                history,
                forecast: Vec::new(),
                model_info: None,
            };
        }

        let values: Vec<f64> = totals.iter().map(|(_, total)| *total).collect();
        let fit = LinearFit::fit(&values);
        let last_month = totals[totals.len() - 1].0;

        let forecast = (1..=months_ahead)
            .map(|step| {
                let future_index = (values.len() - 1) as f64 + step as f64;
                IncomePoint {
                    month: last_month.add_months(step).to_string(),
                    predicted_income: round_to(fit.predict(future_index).max(0.0), 2),
                }
            })
            .collect();

        let slope = round_to(fit.slope, 2);
        IncomeForecast {
            error: None,
            history,
            forecast,
            model_info: Some(ModelInfo {
                slope,
                intercept: round_to(fit.intercept, 2),
                r_squared: round_to(fit.r_squared, 4),
                interpretation: format!("Income changes by ${:.2} per month on average", slope),
            }),
        }
    }

    /// Projects monthly expense totals without model diagnostics. The
    /// insufficient-data variant reports an empty history.
    pub fn expense_trend(ledger: &Ledger, months_ahead: u32) -> ExpenseTrend {
        let totals = ledger.monthly_expense_totals();

        if totals.len() < MIN_HISTORY_MONTHS {
            return ExpenseTrend {
                error: Some(
                    "Not enough data for prediction. Need at least 2 months of expense data."
                        .into(),
                ),
                history: Vec::new(),
                forecast: Vec::new(),
            };
        }

        let history: Vec<MonthlyTotal> = totals
            .iter()
            .map(|(month, total)| MonthlyTotal::new(month.to_string(), *total))
            .collect();
        let values: Vec<f64> = totals.iter().map(|(_, total)| *total).collect();
        let fit = LinearFit::fit(&values);
        let last_month = totals[totals.len() - 1].0;

        let forecast = (1..=months_ahead)
            .map(|step| {
                let future_index = (values.len() - 1) as f64 + step as f64;
                ExpensePoint {
                    month: last_month.add_months(step).to_string(),
                    predicted_expense: round_to(fit.predict(future_index).max(0.0), 2),
                }
            })
            .collect();

        ExpenseTrend {
            error: None,
            history,
            forecast,
        }
    }
}

/// Ordinary least squares line through `values` plotted against their
/// indices `0..n`.
#[derive(Debug, Clone, Copy)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl LinearFit {
    /// Fits the line. Callers guarantee at least two observations, which
    /// keeps the index variance nonzero.
    pub fn fit(values: &[f64]) -> Self {
        let n = values.len() as f64;
        let x_mean = (values.len() - 1) as f64 / 2.0;
        let y_mean = values.iter().sum::<f64>() / n;

        let mut covariance = 0.0;
        let mut variance = 0.0;
        for (index, value) in values.iter().enumerate() {
            let dx = index as f64 - x_mean;
            covariance += dx * (value - y_mean);
            variance += dx * dx;
        }
        let slope = covariance / variance;
        let intercept = y_mean - slope * x_mean;

        let mut ss_res = 0.0;
        let mut ss_tot = 0.0;
        for (index, value) in values.iter().enumerate() {
            let predicted = intercept + slope * index as f64;
            ss_res += (value - predicted).powi(2);
            ss_tot += (value - y_mean).powi(2);
        }
        let r_squared = if ss_tot != 0.0 {
            1.0 - ss_res / ss_tot
        } else {
            0.0
        };

        Self {
            slope,
            intercept,
            r_squared,
        }
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::{AccountService, IncomeService, TransactionService};

    fn ledger_with_account() -> Ledger {
        let mut ledger = Ledger::new("Forecast");
        AccountService::create(&mut ledger, "ACC001", "Checking", "USD").unwrap();
        ledger
    }

    fn add_income(ledger: &mut Ledger, id: &str, date: &str, amount: f64) {
        IncomeService::create(ledger, id, "ACC001", date, amount, Some("Salary")).unwrap();
    }

    fn add_expense(ledger: &mut Ledger, id: &str, date: &str, amount: f64) {
        TransactionService::create(ledger, id, "ACC001", date, amount, "expense", None, None)
            .unwrap();
    }

    #[test]
    fn fit_recovers_a_perfect_line() {
        let fit = LinearFit::fit(&[1000.0, 1100.0, 1200.0]);
        assert!((fit.slope - 100.0).abs() < 1e-9);
        assert!((fit.intercept - 1000.0).abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn constant_history_reports_zero_r_squared() {
        let fit = LinearFit::fit(&[500.0, 500.0]);
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.r_squared, 0.0);
    }

    #[test]
    fn income_forecast_extends_a_linear_history() {
        let mut ledger = ledger_with_account();
        add_income(&mut ledger, "INC001", "2024-01-15", 1000.0);
        add_income(&mut ledger, "INC002", "2024-02-15", 1100.0);
        add_income(&mut ledger, "INC003", "2024-03-15", 1200.0);

        let report = ForecastService::income_forecast(&ledger, 2);
        assert!(report.error.is_none());
        assert_eq!(report.history.len(), 3);
        assert_eq!(report.history[0].month, "2024-01");
        assert_eq!(report.forecast.len(), 2);
        assert_eq!(report.forecast[0].month, "2024-04");
        assert_eq!(report.forecast[0].predicted_income, 1300.0);
        assert_eq!(report.forecast[1].month, "2024-05");
        assert_eq!(report.forecast[1].predicted_income, 1400.0);

        let model = report.model_info.expect("model info");
        assert_eq!(model.slope, 100.0);
        assert_eq!(model.intercept, 1000.0);
        assert_eq!(model.r_squared, 1.0);
        assert_eq!(
            model.interpretation,
            "Income changes by $100.00 per month on average"
        );
    }

    #[test]
    fn single_month_of_income_is_not_enough() {
        let mut ledger = ledger_with_account();
        add_income(&mut ledger, "INC001", "2024-01-15", 1000.0);

        let report = ForecastService::income_forecast(&ledger, 3);
        assert_eq!(
            report.error.as_deref(),
            Some("Not enough data for prediction. Need at least 2 months of income data.")
        );
        assert_eq!(report.history.len(), 1);
        assert!(report.forecast.is_empty());
        assert!(report.model_info.is_none());
    }

    #[test]
    fn declining_income_is_clamped_at_zero() {
        let mut ledger = ledger_with_account();
        add_income(&mut ledger, "INC001", "2024-01-15", 900.0);
        add_income(&mut ledger, "INC002", "2024-02-15", 100.0);

        let report = ForecastService::income_forecast(&ledger, 3);
        let predictions: Vec<f64> = report
            .forecast
            .iter()
            .map(|point| point.predicted_income)
            .collect();
        assert!(predictions.iter().all(|value| *value >= 0.0));
        assert_eq!(predictions[2], 0.0);
    }

    #[test]
    fn forecast_months_roll_over_year_boundaries() {
        let mut ledger = ledger_with_account();
        add_income(&mut ledger, "INC001", "2024-11-15", 1000.0);
        add_income(&mut ledger, "INC002", "2024-12-15", 1100.0);

        let report = ForecastService::income_forecast(&ledger, 3);
        let months: Vec<&str> = report
            .forecast
            .iter()
            .map(|point| point.month.as_str())
            .collect();
        assert_eq!(months, vec!["2025-01", "2025-02", "2025-03"]);
    }

    #[test]
    fn expense_trend_ignores_income_transactions() {
        let mut ledger = ledger_with_account();
        add_expense(&mut ledger, "TXN001", "2024-01-10", 200.0);
        add_expense(&mut ledger, "TXN002", "2024-02-10", 300.0);
        TransactionService::create(
            &mut ledger,
            "TXN003",
            "ACC001",
            "2024-03-10",
            5000.0,
            "income",
            None,
            None,
        )
        .unwrap();

        let report = ForecastService::expense_trend(&ledger, 1);
        assert!(report.error.is_none());
        assert_eq!(report.history.len(), 2);
        assert_eq!(report.history[1].total, 300.0);
        assert_eq!(report.forecast[0].month, "2024-03");
        assert_eq!(report.forecast[0].predicted_expense, 400.0);
    }

    #[test]
    fn expense_trend_error_reports_an_empty_history() {
        let mut ledger = ledger_with_account();
        add_expense(&mut ledger, "TXN001", "2024-01-10", 200.0);

        let report = ForecastService::expense_trend(&ledger, 3);
        assert_eq!(
            report.error.as_deref(),
            Some("Not enough data for prediction. Need at least 2 months of expense data.")
        );
        assert!(report.history.is_empty());
        assert!(report.forecast.is_empty());
    }
}
