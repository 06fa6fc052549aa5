//! Host boundary — the contract the web layer relies on.

use std::sync::Arc;

use gridsight_analysis::explain::ExplanationEngine;
use gridsight_analysis::features::FeatureStore;
use gridsight_analysis::host::ExplainService;
use gridsight_core::GridsightConfig;

fn service() -> ExplainService {
    let mut csv = String::from("timestamp,energy_usage,temperature\n");
    for h in 0..96 {
        let usage = if h == 40 { 310.0 } else { 95.0 + (h % 8) as f64 };
        csv.push_str(&format!("t{h},{usage},{}\n", 12.0 + (h % 4) as f64));
    }
    let matrix = FeatureStore::new()
        .load_from_reader(csv.as_bytes(), "inline")
        .unwrap();
    let engine = ExplanationEngine::new(matrix, GridsightConfig::default());
    engine.fit().unwrap();
    ExplainService::new(Arc::new(engine))
}

#[test]
fn explain_body_matches_dashboard_shape() {
    let svc = service();
    let body = serde_json::to_value(svc.respond(40).unwrap()).unwrap();
    assert_eq!(body["index"], 40);
    let explanation = &body["explanation"];
    assert_eq!(explanation["data_point"]["energy_usage"], 310.0);
    assert_eq!(explanation["feature_importance"]["energy_usage"], 1.0);
    assert!(explanation["decision_score"].as_f64().unwrap() < 0.0);
}

#[test]
fn merge_step_indices_feed_the_cache() {
    let svc = service();
    let report = svc.precompute(&[40, 40, 3, -2, 500]).unwrap();
    assert_eq!(report.cached, 2);
    assert_eq!(report.out_of_range, 2);
    assert_eq!(svc.engine().cache().indices(), vec![3, 40]);

    let stats_before = svc.engine().cache_stats();
    svc.explain(40).unwrap();
    assert_eq!(svc.engine().cache_stats().hits, stats_before.hits + 1);
}

#[test]
fn failures_become_payloads() {
    let svc = service();
    let err = svc.explain(-5).unwrap_err();
    assert_eq!(err.status, 404);
    assert_eq!(err.to_json()["code"], "INDEX_OUT_OF_RANGE");
}
