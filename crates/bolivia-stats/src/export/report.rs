use super::ExportBundle;
use crate::config::DashboardConfig;
use chrono::NaiveDateTime;
use std::fmt::Write;

/// Render the plain-text executive report: header, one block per table,
/// technical footer. Infallible by construction; an empty bundle simply has
/// no section blocks.
pub fn text_report(
    bundle: &ExportBundle,
    config: &DashboardConfig,
    generated_at: NaiveDateTime,
) -> String {
    let mut report = String::new();

    let _ = writeln!(report, "REPORTE BOLIVIA DASHBOARD");
    let _ = writeln!(report, "========================");
    let _ = writeln!(report, "Fecha: {}", bundle.generated_on.format("%Y-%m-%d"));
    let _ = writeln!(report, "Fuente: {}", config.census_source);
    let _ = writeln!(report);
    let _ = writeln!(report, "RESUMEN EJECUTIVO:");
    let _ = writeln!(report, "==================");

    for entry in bundle.entries() {
        let _ = writeln!(report);
        let _ = writeln!(report, "{}:", entry.name.to_uppercase());
        let _ = writeln!(report, "- Registros: {}", entry.table.row_count());
        if let Ok(departments) = entry.table.distinct_text_count("Departamento") {
            let _ = writeln!(report, "- Departamentos: {departments}");
        }
    }

    let _ = writeln!(report);
    let _ = writeln!(report, "INFORMACIÓN TÉCNICA:");
    let _ = writeln!(report, "====================");
    let _ = writeln!(report, "- Dashboard: {}", config.title);
    let _ = writeln!(
        report,
        "- Generado: {}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(report, "- Versión: 1.0");

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportBundle;
    use crate::tables::{Cell, Table};
    use chrono::NaiveDate;

    fn generated_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 30)
            .expect("valid date")
            .and_hms_opt(12, 30, 0)
            .expect("valid time")
    }

    #[test]
    fn report_lists_sections_with_department_counts() {
        let config = DashboardConfig::default();
        let mut bundle = ExportBundle::new(generated_at().date());
        let mut table = Table::new("Poblacion", vec!["Departamento", "Habitantes"]);
        table
            .push_row(vec![Cell::text("Beni"), Cell::int(477_441)])
            .expect("row matches arity");
        table
            .push_row(vec![Cell::text("Pando"), Cell::int(130_761)])
            .expect("row matches arity");
        bundle.push(table);

        let report = text_report(&bundle, &config, generated_at());
        assert!(report.contains("POBLACION:"));
        assert!(report.contains("- Registros: 2"));
        assert!(report.contains("- Departamentos: 2"));
        assert!(report.contains("Fuente: INE Bolivia - Censo 2024"));
        assert!(report.contains("- Generado: 2025-06-30 12:30:00"));
    }

    #[test]
    fn empty_bundle_report_keeps_header_and_footer_only() {
        let config = DashboardConfig::default();
        let bundle = ExportBundle::new(generated_at().date());
        let report = text_report(&bundle, &config, generated_at());
        assert!(report.contains("RESUMEN EJECUTIVO:"));
        assert!(!report.contains("- Registros:"));
        assert!(report.contains("- Versión: 1.0"));
    }
}
