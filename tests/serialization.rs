//! JSON shape of results and configuration handed to host applications.

use chrono::NaiveDate;
use cost_insights::comparison::EntityRow;
use cost_insights::core::Series;
use cost_insights::models::{ForecastConfig, ForecastEngine};
use cost_insights::trend::TrendConfig;
use serde_json::json;

fn make_series(values: &[f64]) -> Series {
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    Series::from_values(start, "analytics", values).unwrap()
}

#[test]
fn forecast_result_serializes_dates_and_method() {
    let result = cost_insights::forecast(&make_series(&[10.0, 20.0]), "exponential", 2).unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["method"], json!("exponential"));
    assert_eq!(value["confidence"], json!(0.8));
    assert_eq!(value["predictions"][0]["date"], json!("2024-03-03"));
    assert_eq!(value["predictions"][1]["date"], json!("2024-03-04"));
    assert!(value["metadata"]["alpha"].is_number());
}

#[test]
fn trend_result_uses_snake_case_classification() {
    let values: Vec<f64> = (0..10).map(|i| 100.0 * (i + 1) as f64).collect();
    let result = cost_insights::analyze_trend(&make_series(&values));
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["overall_trend"], json!("rapidly_increasing"));
    assert_eq!(value["period"]["start"], json!("2024-03-01"));
    assert_eq!(value["period"]["end"], json!("2024-03-10"));
    assert!(value["summary"]["narrative"]
        .as_str()
        .unwrap()
        .starts_with("Costs are rapidly increasing"));
}

#[test]
fn anomaly_serializes_severity_and_type() {
    let mut values = vec![100.0; 30];
    values[3] = 0.0;
    let anomalies = cost_insights::detect_anomalies(&make_series(&values), 2.0);
    let value = serde_json::to_value(&anomalies).unwrap();

    assert_eq!(value[0]["anomaly_type"], json!("drop"));
    assert_eq!(value[0]["severity"], json!("high"));
    assert_eq!(value[0]["entity_label"], json!("analytics"));
}

#[test]
fn comparison_serializes_axis_and_benchmarks() {
    let rows = vec![EntityRow::new("eu-west-1", 40.0, 4.0, 2)];
    let result = cost_insights::compare_entities(&rows, "regions").unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["comparison_type"], json!("regions"));
    assert_eq!(value["metrics"][0]["rank"], json!(1));
    assert_eq!(value["benchmarks"]["avg_efficiency"], json!(20.0));
    assert!(value["period"].is_null());
}

#[test]
fn partial_configuration_keeps_defaults() {
    let config: ForecastConfig = serde_json::from_value(json!({
        "seasonal": { "season_length": 30 },
        "max_horizon": 90
    }))
    .unwrap();
    assert_eq!(config.seasonal.season_length, 30);
    assert_eq!(config.seasonal.seasonal_weight, 0.3);
    assert_eq!(config.max_horizon, Some(90));
    assert!(ForecastEngine::with_config(config).is_ok());

    let trend: TrendConfig = serde_json::from_value(json!({ "anomaly_window": 14 })).unwrap();
    assert_eq!(trend.anomaly_window, 14);
    assert_eq!(trend.rapid_growth_percent, 20.0);
}

#[test]
fn invalid_configuration_is_rejected_by_the_engine() {
    let config: ForecastConfig =
        serde_json::from_value(json!({ "exponential": { "alpha": 0.0 } })).unwrap();
    assert!(ForecastEngine::with_config(config).is_err());
}
