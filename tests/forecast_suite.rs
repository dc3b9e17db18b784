use finance_core::core::services::{ForecastService, SeedService};
use finance_core::ledger::Ledger;

fn seeded_ledger() -> Ledger {
    let mut ledger = Ledger::new("Forecast Suite");
    SeedService::seed_demo(&mut ledger).expect("seed demo data");
    ledger
}

#[test]
fn seeded_income_forecast_matches_the_fitted_line() {
    let ledger = seeded_ledger();
    let report = ForecastService::income_forecast(&ledger, 3);

    assert!(report.error.is_none());
    assert_eq!(report.history.len(), 6);
    assert_eq!(report.history[0].month, "2024-07");
    assert_eq!(report.history[0].total, 3500.0);
    assert_eq!(report.history[5].month, "2024-12");
    assert_eq!(report.history[5].total, 4400.0);

    let months: Vec<&str> = report
        .forecast
        .iter()
        .map(|point| point.month.as_str())
        .collect();
    assert_eq!(months, vec!["2025-01", "2025-02", "2025-03"]);
    assert_eq!(report.forecast[0].predicted_income, 4286.67);
    assert_eq!(report.forecast[1].predicted_income, 4463.81);
    assert_eq!(report.forecast[2].predicted_income, 4640.95);

    let model = report.model_info.expect("model info");
    assert_eq!(model.slope, 177.14);
    assert_eq!(model.intercept, 3223.81);
    assert_eq!(model.r_squared, 0.5314);
    assert_eq!(
        model.interpretation,
        "Income changes by $177.14 per month on average"
    );
}

#[test]
fn seeded_expense_trend_projects_next_month() {
    let ledger = seeded_ledger();
    let report = ForecastService::expense_trend(&ledger, 1);

    assert!(report.error.is_none());
    assert_eq!(report.history.len(), 6);
    assert_eq!(report.history[0].total, 200.0);
    assert_eq!(report.history[5].total, 680.0);
    assert_eq!(report.forecast.len(), 1);
    assert_eq!(report.forecast[0].month, "2025-01");
    assert_eq!(report.forecast[0].predicted_expense, 611.33);
}

#[test]
fn horizon_length_only_extends_the_projection() {
    let ledger = seeded_ledger();
    let short = ForecastService::income_forecast(&ledger, 1);
    let long = ForecastService::income_forecast(&ledger, 12);

    assert_eq!(short.forecast.len(), 1);
    assert_eq!(long.forecast.len(), 12);
    assert_eq!(short.forecast[0], long.forecast[0]);
    assert_eq!(short.model_info, long.model_info);
    assert_eq!(long.forecast[11].month, "2025-12");
}

#[test]
fn successful_forecasts_omit_the_error_key_in_json() {
    let ledger = seeded_ledger();
    let report = ForecastService::income_forecast(&ledger, 2);
    let value = serde_json::to_value(&report).expect("serialize forecast");

    let object = value.as_object().expect("json object");
    assert!(!object.contains_key("error"));
    assert!(object.contains_key("model_info"));
    assert_eq!(object["forecast"].as_array().expect("array").len(), 2);
}

#[test]
fn insufficient_history_reports_through_the_error_key() {
    let ledger = Ledger::new("Empty");
    let report = ForecastService::income_forecast(&ledger, 3);
    let value = serde_json::to_value(&report).expect("serialize forecast");

    let object = value.as_object().expect("json object");
    assert_eq!(
        object["error"].as_str(),
        Some("Not enough data for prediction. Need at least 2 months of income data.")
    );
    assert!(!object.contains_key("model_info"));
    assert!(object["forecast"].as_array().expect("array").is_empty());
}
