// tests/api_routes.rs
use chrono::Duration;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use warp::http::StatusCode;

use tob_reform_dashboard::routes::routes;
use tob_reform_dashboard::services::catalog::Catalog;
use tob_reform_dashboard::services::numeric::ParsePolicy;
use tob_reform_dashboard::services::source::DataSource;
use tob_reform_dashboard::services::store::DatasetStore;

const PROJECTIONS: &str = "year,oasdi_taxable_payroll,gdp
2026,10000,25000
2027,10500,26000
2036,15000,38000
";

const STATIC_RESULTS: &str = "reform_name,year,baseline_revenue,reform_revenue,revenue_impact,baseline_tob_medicare_hi,reform_tob_medicare_hi,tob_medicare_hi_impact,baseline_tob_oasdi,reform_tob_oasdi,tob_oasdi_impact,baseline_tob_total,reform_tob_total,tob_total_impact,oasdi_net_impact,hi_net_impact,scoring_type
option1,2027,1100,990,-110,88,0,-88,22,0,-22,110,0,-110,,,static
option1,2026,1000,900,-100,80,0,-80,20,0,-20,100,0,-100,,,static
option1,2036,1500,1350,-150,120,0,-120,30,0,-30,150,0,-150,,,static
option7,2026,2600,2666.3,66.3,82.28,90,7.72,20.56,25,4.44,102.84,115,12.16,,,static
option99,2026,1,1,0,0,0,1,0,0,1,0,0,0,,,static
";

const POLICY_IMPACTS: &str = "policy_id,policy_name,credit_value,year,impact_billions
1,Repeal Social Security Benefits Tax,,2025,-140
4,Social Security Credit,300,2025,-10
";

fn data_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tob-api-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("ssa_economic_projections.csv"), PROJECTIONS).unwrap();
    fs::write(dir.join("all_static_results.csv"), STATIC_RESULTS).unwrap();
    fs::write(dir.join("policy_impacts.csv"), POLICY_IMPACTS).unwrap();
    dir
}

fn store(dir: &PathBuf) -> Arc<DatasetStore> {
    Arc::new(DatasetStore::new(
        DataSource::directory(dir),
        ParsePolicy::Strict,
        Duration::minutes(60),
        Catalog::builtin(),
    ))
}

async fn get_json(store: Arc<DatasetStore>, path: &str) -> (StatusCode, Value) {
    let res = warp::test::request()
        .method("GET")
        .path(path)
        .reply(&routes(store))
        .await;
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    (res.status(), body)
}

#[tokio::test]
async fn lists_catalog_with_allocation_rules() {
    let dir = data_dir("reforms");
    let (status, body) = get_json(store(&dir), "/api/v1/reforms").await;

    assert_eq!(status, StatusCode::OK);
    let reforms = body.as_array().unwrap();
    assert_eq!(reforms.len(), 8);
    assert_eq!(reforms[0]["id"], "option1");
    assert_eq!(reforms[0]["shortName"], "Full Repeal");
    assert_eq!(reforms[0]["allocationRule"], "trust_fund_split");
    assert_eq!(reforms[3]["allocationRule"], "proportional_to_baseline");
    assert_eq!(reforms[6]["allocationRule"], "general_revenue");

    fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn impacts_are_windowed_with_full_horizon_totals() {
    let dir = data_dir("impacts");
    let (status, body) = get_json(store(&dir), "/api/v1/impacts/static/option1").await;

    assert_eq!(status, StatusCode::OK);
    let yearly = body["yearly"].as_array().unwrap();
    assert_eq!(yearly.len(), 2);
    assert_eq!(yearly[0]["year"], 2026);
    assert_eq!(yearly[1]["year"], 2027);
    assert_eq!(body["totals"]["tenYear"], -210.0);
    assert_eq!(body["totals"]["total"], -360.0);
    assert_eq!(body["headline"]["tenYear"], "-$210.0B");
    assert_eq!(body["scoringLabel"], "Static Scoring");
    assert_eq!(body["comparison"].as_array().unwrap().len(), 5);
    assert_eq!(body["comparison"][0]["source"], "PolicyEngine");
    assert_eq!(body["comparison"][1]["display"], "-$1600.0B");

    fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn impacts_respect_window_and_unit_query() {
    let dir = data_dir("window");
    let (status, body) = get_json(
        store(&dir),
        "/api/v1/impacts/static/option1?window=75year&unit=pctPayroll",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["yearly"].as_array().unwrap().len(), 3);
    assert_eq!(body["windowLabel"], "75-Year (2026-2100)");
    assert_eq!(body["headline"]["tenYear"], "-1.02%");

    let (status, body) = get_json(store(&dir), "/api/v1/impacts/static/option1?window=20year").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "bad_request");

    fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn general_revenue_reform_has_no_trust_fund_split() {
    let dir = data_dir("option7");
    let (status, body) = get_json(store(&dir), "/api/v1/impacts/static/option7").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["yearly"][0]["revenueImpact"], 66.3);
    assert_eq!(body["yearly"][0]["tobOasdiImpact"], 0.0);
    assert_eq!(body["yearly"][0]["tobMedicareHiImpact"], 0.0);
    assert_eq!(body["allocationRule"], "general_revenue");

    fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn errors_distinguish_missing_data_from_bad_requests() {
    let dir = data_dir("errors");

    let (status, body) = get_json(store(&dir), "/api/v1/impacts/dynamic/option1").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["kind"], "fetch_failed");

    let (status, body) = get_json(store(&dir), "/api/v1/impacts/behavioral/option1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "bad_request");

    let (status, body) = get_json(store(&dir), "/api/v1/impacts/static/option99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");

    let (status, body) = get_json(store(&dir), "/api/v1/impacts/static/option2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");

    fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn malformed_results_are_reported_as_invalid_data() {
    let dir = data_dir("malformed");
    fs::write(
        dir.join("all_static_results.csv"),
        "reform_name,year,baseline_revenue,reform_revenue,tob_oasdi_impact,tob_medicare_hi_impact\noption1,2026,1000,900,-20,oops\n",
    )
    .unwrap();

    let (status, body) = get_json(store(&dir), "/api/v1/impacts/static/option1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "invalid_data");
    assert!(body["error"].as_str().unwrap().contains("tob_medicare_hi_impact"));

    fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn totals_cover_every_reform_in_the_table() {
    let dir = data_dir("totals");
    let (status, body) = get_json(store(&dir), "/api/v1/totals/static").await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r["reformId"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["option1", "option7", "option99"]);
    assert_eq!(rows[2]["name"], Value::Null);
    assert_eq!(rows[1]["totals"]["tenYear"], 66.3);

    fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn export_downloads_csv_attachment() {
    let dir = data_dir("export");
    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/export/static/option1")
        .reply(&routes(store(&dir)))
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "text/csv;charset=utf-8");
    assert_eq!(
        res.headers()["content-disposition"],
        "attachment; filename=\"option1_impact_data.csv\""
    );

    let body = String::from_utf8(res.body().to_vec()).unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Reform,Year,Revenue Impact ($B)"));
    assert_eq!(
        lines[1],
        "Full Repeal of Social Security Benefit Taxation,2026,-100.00,-20.00,-80.00,-100.00,1000.00,900.00,-1.000,-0.400"
    );
    assert!(lines[3].contains(",2036,"));

    fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn policy_impacts_are_served() {
    let dir = data_dir("policy");
    let (status, body) = get_json(store(&dir), "/api/v1/policy_impacts").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["policies"].as_array().unwrap().len(), 2);
    assert_eq!(body["policies"][1]["hasMultipleCreditValues"], true);
    assert_eq!(body["impactData"]["4_300"][0]["year"], 1);

    fs::remove_dir_all(&dir).ok();
}
