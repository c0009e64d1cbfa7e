use super::{filter_labels, Department, MetricCard};
use crate::charts::{BarMode, BarOrientation, ChartKind, ChartSpec, ScatterPoint, Series};
use crate::tables::{Cell, Table};

/// National literacy rate 2015-2024: (year, literacy %). Illiteracy is the
/// complement, derived at load.
const LITERACY: [(i32, f64); 10] = [
    (2015, 95.37),
    (2016, 95.45),
    (2017, 95.52),
    (2018, 95.60),
    (2019, 95.68),
    (2020, 95.75),
    (2021, 95.83),
    (2022, 95.90),
    (2023, 95.98),
    (2024, 96.06),
];

/// Departmental attainment: (department, literacy %, completed primary %,
/// completed secondary %, university %).
const ATTAINMENT: [(Department, f64, f64, f64, f64); 9] = [
    (Department::SantaCruz, 97.5, 58.2, 42.5, 18.9),
    (Department::LaPaz, 96.2, 55.8, 40.2, 17.5),
    (Department::Cochabamba, 95.8, 54.1, 38.7, 16.8),
    (Department::Potosi, 91.4, 45.2, 28.9, 10.2),
    (Department::Chuquisaca, 92.3, 47.6, 31.4, 12.8),
    (Department::Tarija, 95.1, 52.3, 36.8, 14.6),
    (Department::Oruro, 94.7, 51.8, 35.2, 13.9),
    (Department::Beni, 93.6, 48.9, 32.6, 11.4),
    (Department::Pando, 92.8, 46.5, 30.1, 9.8),
];

#[derive(Debug, Clone)]
pub struct LiteracyYear {
    pub year: i32,
    pub literacy_pct: f64,
    pub illiteracy_pct: f64,
}

#[derive(Debug, Clone)]
pub struct DepartmentAttainment {
    pub department: Department,
    pub literacy_pct: f64,
    pub primary_pct: f64,
    pub secondary_pct: f64,
    pub university_pct: f64,
}

#[derive(Debug)]
pub struct EducationSection {
    pub literacy: Vec<LiteracyYear>,
    pub attainment: Vec<DepartmentAttainment>,
}

impl EducationSection {
    pub fn load() -> Self {
        Self {
            literacy: LITERACY
                .iter()
                .map(|&(year, literacy_pct)| LiteracyYear {
                    year,
                    literacy_pct,
                    illiteracy_pct: 100.0 - literacy_pct,
                })
                .collect(),
            attainment: ATTAINMENT
                .iter()
                .map(
                    |&(department, literacy_pct, primary_pct, secondary_pct, university_pct)| {
                        DepartmentAttainment {
                            department,
                            literacy_pct,
                            primary_pct,
                            secondary_pct,
                            university_pct,
                        }
                    },
                )
                .collect(),
        }
    }

    pub fn metrics(&self) -> Vec<MetricCard> {
        let latest = self.literacy.last().expect("literacy series is never empty");
        let secondary_mean = self
            .attainment
            .iter()
            .map(|row| row.secondary_pct)
            .sum::<f64>()
            / self.attainment.len() as f64;
        let university_mean = self
            .attainment
            .iter()
            .map(|row| row.university_pct)
            .sum::<f64>()
            / self.attainment.len() as f64;

        let literacy_gap = column_gap(&self.attainment, |row| row.literacy_pct);
        let university_gap = column_gap(&self.attainment, |row| row.university_pct);

        vec![
            MetricCard::new(
                "Alfabetización",
                format!("{:.1}%", latest.literacy_pct),
                format!("Nacional {}", latest.year),
            ),
            MetricCard::new(
                "Analfabetismo",
                format!("{:.1}%", latest.illiteracy_pct),
                format!("Nacional {}", latest.year),
            ),
            MetricCard::new(
                "Secundaria Completa",
                format!("{secondary_mean:.1}%"),
                "Promedio nacional",
            ),
            MetricCard::new(
                "Educación Universitaria",
                format!("{university_mean:.1}%"),
                "Promedio nacional",
            ),
            MetricCard::new(
                "Brecha Alfabetización",
                format!("{literacy_gap:.1} pts"),
                "máximo menos mínimo departamental",
            ),
            MetricCard::new(
                "Brecha Universitaria",
                format!("{university_gap:.1} pts"),
                "máximo menos mínimo departamental",
            ),
        ]
    }

    pub fn charts(&self, departments: Option<&[Department]>) -> Vec<ChartSpec> {
        let years: Vec<String> = self.literacy.iter().map(|row| row.year.to_string()).collect();

        let literacy_trend = ChartSpec::categorical(
            "Tasa de Alfabetización (%)",
            ChartKind::Line,
            years.clone(),
            vec![Series::new(
                "Alfabetización",
                self.literacy.iter().map(|row| row.literacy_pct).collect(),
            )],
        )
        .with_axis_titles("Año", "Alfabetización (%)");

        let illiteracy_trend = ChartSpec::categorical(
            "Tasa de Analfabetismo (%)",
            ChartKind::Line,
            years,
            vec![Series::new(
                "Analfabetismo",
                self.literacy.iter().map(|row| row.illiteracy_pct).collect(),
            )],
        )
        .with_axis_titles("Año", "Analfabetismo (%)");

        let selected = filter_labels(departments);
        let horizontal = ChartKind::Bar {
            orientation: BarOrientation::Horizontal,
            mode: BarMode::Grouped,
        };

        let mut by_literacy: Vec<&DepartmentAttainment> = self
            .attainment
            .iter()
            .filter(|row| selected.contains(&row.department))
            .collect();
        by_literacy.sort_by(|a, b| {
            a.literacy_pct
                .partial_cmp(&b.literacy_pct)
                .expect("literacy rates are finite")
        });

        let departmental_literacy = ChartSpec::categorical(
            "Alfabetización por Departamento (%)",
            horizontal,
            by_literacy
                .iter()
                .map(|row| row.department.label().to_string())
                .collect(),
            vec![Series::new(
                "Alfabetización",
                by_literacy.iter().map(|row| row.literacy_pct).collect(),
            )],
        );

        let mut by_secondary = by_literacy.clone();
        by_secondary.sort_by(|a, b| {
            a.secondary_pct
                .partial_cmp(&b.secondary_pct)
                .expect("secondary rates are finite")
        });

        let departmental_secondary = ChartSpec::categorical(
            "Secundaria Completa por Departamento (%)",
            horizontal,
            by_secondary
                .iter()
                .map(|row| row.department.label().to_string())
                .collect(),
            vec![Series::new(
                "Secundaria Completa",
                by_secondary.iter().map(|row| row.secondary_pct).collect(),
            )],
        );

        let national: Vec<String> = self
            .attainment
            .iter()
            .map(|row| row.department.label().to_string())
            .collect();

        let levels = ChartSpec::categorical(
            "Niveles Educativos Completados por Departamento",
            ChartKind::Bar {
                orientation: BarOrientation::Vertical,
                mode: BarMode::Grouped,
            },
            national.clone(),
            vec![
                Series::new(
                    "Primaria",
                    self.attainment.iter().map(|row| row.primary_pct).collect(),
                ),
                Series::new(
                    "Secundaria",
                    self.attainment.iter().map(|row| row.secondary_pct).collect(),
                ),
                Series::new(
                    "Universitaria",
                    self.attainment.iter().map(|row| row.university_pct).collect(),
                ),
            ],
        )
        .with_axis_titles("Departamento", "Porcentaje");

        let university = ChartSpec::categorical(
            "Distribución de Educación Universitaria",
            ChartKind::Pie,
            national,
            vec![Series::new(
                "Universitaria",
                self.attainment.iter().map(|row| row.university_pct).collect(),
            )],
        );

        let gaps = ChartSpec::scatter(
            "Relación entre Alfabetización y Educación Universitaria",
            self.attainment
                .iter()
                .map(|row| ScatterPoint {
                    label: row.department.label().to_string(),
                    x: row.literacy_pct,
                    y: row.university_pct,
                    size: Some(row.secondary_pct),
                })
                .collect(),
        )
        .with_axis_titles("Alfabetización (%)", "Universitaria (%)");

        vec![
            literacy_trend,
            illiteracy_trend,
            departmental_literacy,
            departmental_secondary,
            levels,
            university,
            gaps,
        ]
    }

    pub fn tables(&self) -> Vec<Table> {
        let mut temporal = Table::new(
            "Educacion_Temporal",
            vec!["Año", "Alfabetización_%", "Analfabetismo_%"],
        );
        for row in &self.literacy {
            temporal
                .push_row(vec![
                    Cell::int(row.year as i64),
                    Cell::float(row.literacy_pct),
                    Cell::float(row.illiteracy_pct),
                ])
                .expect("literacy row matches headers");
        }

        let mut departmental = Table::new(
            "Educacion_Departamental",
            vec![
                "Departamento",
                "Alfabetización_%",
                "Primaria_Completa_%",
                "Secundaria_Completa_%",
                "Universitaria_%",
            ],
        );
        for row in &self.attainment {
            departmental
                .push_row(vec![
                    Cell::text(row.department.label()),
                    Cell::float(row.literacy_pct),
                    Cell::float(row.primary_pct),
                    Cell::float(row.secondary_pct),
                    Cell::float(row.university_pct),
                ])
                .expect("attainment row matches headers");
        }

        vec![temporal, departmental]
    }
}

fn column_gap(rows: &[DepartmentAttainment], pick: fn(&DepartmentAttainment) -> f64) -> f64 {
    let max = rows.iter().map(pick).fold(f64::NEG_INFINITY, f64::max);
    let min = rows.iter().map(pick).fold(f64::INFINITY, f64::min);
    max - min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illiteracy_complements_literacy() {
        let section = EducationSection::load();
        for row in &section.literacy {
            assert!((row.literacy_pct + row.illiteracy_pct - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn headline_metrics_use_latest_year() {
        let metrics = EducationSection::load().metrics();
        assert_eq!(metrics[0].value, "96.1%");
        assert_eq!(metrics[0].caption, "Nacional 2024");
        assert_eq!(metrics[1].value, "3.9%");
    }

    #[test]
    fn gap_metrics_span_departmental_extremes() {
        let metrics = EducationSection::load().metrics();
        assert_eq!(metrics[4].value, "6.1 pts");
        assert_eq!(metrics[5].value, "9.1 pts");
    }

    #[test]
    fn scatter_carries_one_point_per_department() {
        let charts = EducationSection::load().charts(None);
        let scatter = charts.last().expect("scatter chart present");
        assert!(matches!(scatter.kind, ChartKind::Scatter));
        assert_eq!(scatter.len(), 9);
    }

    #[test]
    fn attainment_levels_are_ordered() {
        let section = EducationSection::load();
        for row in &section.attainment {
            assert!(row.primary_pct > row.secondary_pct);
            assert!(row.secondary_pct > row.university_pct);
        }
    }
}
