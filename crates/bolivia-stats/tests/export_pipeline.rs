use bolivia_stats::config::DashboardConfig;
use bolivia_stats::export::{
    combined_csv, table_from_csv, table_to_csv, text_report, workbook_bytes, ExportBundle,
};
use bolivia_stats::sections::{section_tables, Section};
use chrono::NaiveDate;

fn generation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date")
}

#[test]
fn every_section_table_round_trips_through_csv() {
    for section in Section::ordered() {
        for table in section_tables(section) {
            let text = table_to_csv(&table).expect("table serializes");
            let parsed = table_from_csv(table.name(), &text).expect("csv parses back");
            assert_eq!(parsed.row_count(), table.row_count(), "{}", table.name());
            assert_eq!(parsed.columns(), table.columns(), "{}", table.name());
        }
    }
}

#[test]
fn default_dashboard_exports_all_three_formats() {
    let config = DashboardConfig::default();
    let bundle = ExportBundle::for_dashboard(&config, generation_date());

    let csv = combined_csv(&bundle).expect("csv builds");
    assert!(csv.contains("Sección"));
    assert!(csv.contains("Santa Cruz"));

    let workbook = workbook_bytes(&bundle).expect("workbook builds");
    assert_eq!(&workbook[..2], b"PK");

    let report = text_report(&bundle, &config, generation_date().and_hms_opt(8, 0, 0).unwrap());
    assert!(report.contains("POBLACION:"));
    assert!(report.contains("MORTALIDAD:"));
    // Electoral is disabled by default.
    assert!(!report.contains("DATOS_ELECTORALES:"));
}

#[test]
fn empty_bundle_never_fails_any_serializer() {
    let config = DashboardConfig::with_sections(Vec::new());
    let bundle = ExportBundle::for_dashboard(&config, generation_date());
    assert!(bundle.is_empty());

    assert!(combined_csv(&bundle).expect("csv builds").is_empty());
    assert!(!workbook_bytes(&bundle).expect("workbook builds").is_empty());

    let report = text_report(&bundle, &config, generation_date().and_hms_opt(8, 0, 0).unwrap());
    assert!(report.contains("REPORTE BOLIVIA DASHBOARD"));
}

#[test]
fn enabling_electoral_adds_its_table_to_the_bundle() {
    let config = DashboardConfig::with_sections(vec![Section::Electoral]);
    let bundle = ExportBundle::for_dashboard(&config, generation_date());
    assert_eq!(bundle.entries().len(), 1);
    assert_eq!(bundle.entries()[0].name, "Datos_Electorales");
    assert_eq!(bundle.entries()[0].table.row_count(), 9);
}
