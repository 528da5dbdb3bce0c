use agdata_processor::analyzers::{group_extremes, percent_change, DashboardReport};
use agdata_processor::config::DashboardConfig;
use agdata_processor::readers::DatasetCache;
use agdata_processor::{load, AnalysisError, CleaningRule};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_fixtures(dir: &Path) {
    fs::write(
        dir.join("Cropland Value.csv"),
        "Program,Year,Period,Geo Level,State,Data Item,Value\n\
         SURVEY,2025,YEAR,STATE,OHIO,\"AG LAND, CROPLAND - ASSET VALUE, MEASURED IN $ / ACRE\",\"9,000\"\n\
         SURVEY,2013,YEAR,STATE,OHIO,\"AG LAND, CROPLAND - ASSET VALUE, MEASURED IN $ / ACRE\",\"4,000\"\n\
         SURVEY,2025,YEAR,STATE,INDIANA,\"AG LAND, CROPLAND - ASSET VALUE, MEASURED IN $ / ACRE\",\"6,000\"\n\
         SURVEY,2013,YEAR,STATE,INDIANA,\"AG LAND, CROPLAND - ASSET VALUE, MEASURED IN $ / ACRE\",\"3,000\"\n",
    )
    .expect("write cropland fixture");

    fs::write(
        dir.join("Crop Prices.csv"),
        "Program,Year,Period,Commodity,Value\n\
         SURVEY,2020,MARKETING YEAR,CORN,4.53\n\
         SURVEY,2024,MARKETING YEAR,CORN,4.24\n\
         SURVEY,2020,MARKETING YEAR,SOYBEANS,10.8\n\
         SURVEY,2024,MARKETING YEAR,SOYBEANS,(NA)\n\
         SURVEY,2022,MARKETING YEAR,SOYBEANS,14.2\n",
    )
    .expect("write crop prices fixture");

    fs::write(
        dir.join("Index Pricing.csv"),
        "Program,Year,Period,Data Item,Value\n\
         SURVEY,2011,YEAR,FOOD COMMODITIES - INDEX FOR PRICE RECEIVED,100\n\
         SURVEY,2011,JAN,FOOD COMMODITIES - INDEX FOR PRICE RECEIVED,97.4\n\
         SURVEY,2016,YEAR,FOOD COMMODITIES - INDEX FOR PRICE RECEIVED,89.6\n\
         SURVEY,2022,YEAR,FOOD COMMODITIES - INDEX FOR PRICE RECEIVED,131.9\n\
         SURVEY,2024,YEAR,FOOD COMMODITIES - INDEX FOR PRICE RECEIVED,115.0\n",
    )
    .expect("write index fixture");
}

#[test]
fn test_dashboard_report_from_config_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    write_fixtures(temp_dir.path());

    let config_path = temp_dir.path().join("agdata.toml");
    fs::write(
        &config_path,
        format!("data_dir = \"{}\"\n", temp_dir.path().display()),
    )
    .unwrap();

    let config = DashboardConfig::load(Some(&config_path)).unwrap();
    let mut cache = DatasetCache::new();
    let report = DashboardReport::build(&config, &mut cache).unwrap();

    let ohio = &report.cropland.metrics[0];
    assert_eq!(ohio.extremes.group, "OHIO");
    assert_eq!(ohio.growth_percent, Some(125.0));
    assert_eq!(report.cropland.latest_year, Some(2025));
    assert_eq!(report.cropland.ranking[0].group, "OHIO");

    let soybeans = &report.crop_prices.metrics[1];
    assert_eq!(soybeans.extremes.group, "SOYBEANS");
    assert_eq!(soybeans.extremes.latest_year, 2022);
    assert_eq!(report.crop_prices.missing_values, 1);
    // Soybeans has no usable 2024 price
    assert_eq!(report.crop_prices.ranking.len(), 1);

    assert_eq!(report.index.observations, 4);
    assert_eq!((report.index.current_year, report.index.current), (2024, 115.0));
    assert_eq!((report.index.lowest_year, report.index.lowest), (2016, 89.6));

    let text = report.summary().unwrap();
    assert!(text.contains("- OHIO: $9,000/acre in 2025 (+125.0% since 2013)"));
    assert!(text.contains("Current Index (2024): 115.0"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["cropland"]["metrics"][0]["latest"], 9000.0);
    assert_eq!(json["index"]["highest_year"], 2022);

    // Rebuilding reuses every cached load
    DashboardReport::build(&config, &mut cache).unwrap();
    assert_eq!(cache.stats().hits, 3);
}

#[test]
fn test_group_extremes_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    write_fixtures(temp_dir.path());

    let path = temp_dir.path().join("Cropland Value.csv");
    let table = load(&path, CleaningRule::CommaStripped).unwrap();
    let report = group_extremes(&table, "State", "Value_Clean").unwrap();

    let indiana = report.get("INDIANA").unwrap();
    assert_eq!((indiana.earliest, indiana.latest), (3000.0, 6000.0));
    assert_eq!((indiana.max, indiana.year_of_max), (6000.0, 2025));
    assert_eq!((indiana.min, indiana.year_of_min), (3000.0, 2013));
    assert_eq!(percent_change(indiana.earliest, indiana.latest).unwrap(), 100.0);
}

#[test]
fn test_price_markers_are_fatal_only_under_comma_rule() {
    let temp_dir = TempDir::new().unwrap();
    write_fixtures(temp_dir.path());
    let prices = temp_dir.path().join("Crop Prices.csv");

    let err = load(&prices, CleaningRule::CommaStripped).unwrap_err();
    assert!(matches!(err, AnalysisError::Parse { row: 4, .. }));
    assert_eq!(load(&prices, CleaningRule::Coercive).unwrap().len(), 5);
}

#[test]
fn test_missing_dataset_reports_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = DashboardConfig::default();
    config.data_dir = temp_dir.path().to_path_buf();

    let err = DashboardReport::build(&config, &mut DatasetCache::new()).unwrap_err();
    assert!(matches!(err, AnalysisError::Io(_)));
}
