use super::{filter_labels, Department, MetricCard};
use crate::charts::{BarMode, BarOrientation, ChartKind, ChartSpec, Series};
use crate::tables::{group_thousands, Cell, Table};

/// Official census totals the metric cards quote directly.
const NATIONAL_POPULATION_2024: i64 = 11_312_620;
const NATIONAL_POPULATION_2012: i64 = 10_059_856;

/// Per-department census rows: (department, population 2024, population 2012,
/// surface km²). INE census figures.
const CENSUS: [(Department, i64, i64, i64); 9] = [
    (Department::SantaCruz, 3_115_386, 2_657_762, 370_621),
    (Department::LaPaz, 3_022_566, 2_719_344, 133_985),
    (Department::Cochabamba, 2_005_373, 1_762_761, 55_631),
    (Department::Potosi, 856_419, 828_093, 118_218),
    (Department::Chuquisaca, 600_132, 581_347, 51_524),
    (Department::Tarija, 534_348, 483_518, 37_623),
    (Department::Oruro, 570_194, 494_587, 53_588),
    (Department::Beni, 477_441, 422_008, 213_564),
    (Department::Pando, 130_761, 110_436, 63_827),
];

/// National census history 1950-2024: (year, population).
const HISTORY: [(i32, i64); 6] = [
    (1950, 2_704_165),
    (1976, 4_613_419),
    (1992, 6_420_792),
    (2001, 8_274_325),
    (2012, 10_059_856),
    (2024, 11_312_620),
];

/// Intercensal growth rates: (period, annual rate %, span in years).
const INTERCENSAL: [(&str, f64, i64); 5] = [
    ("50-76", 2.050, 26),
    ("76-92", 2.110, 16),
    ("92-01", 2.740, 9),
    ("01-12", 1.743, 11),
    ("12-24", 1.035, 12),
];

/// One department with its derived census indicators, computed once at load.
#[derive(Debug, Clone)]
pub struct DepartmentCensus {
    pub department: Department,
    pub population_2024: i64,
    pub population_2012: i64,
    pub surface_km2: i64,
    pub density: f64,
    pub absolute_growth: i64,
    pub growth_pct: f64,
    pub share_pct: f64,
}

/// One historical census with growth over the previous one. The first census
/// on record has nothing to grow from.
#[derive(Debug, Clone)]
pub struct CensusYear {
    pub year: i32,
    pub population: i64,
    pub absolute_growth: Option<i64>,
    pub growth_pct: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct IntercensalRate {
    pub period: &'static str,
    pub annual_rate_pct: f64,
    pub span_years: i64,
}

#[derive(Debug)]
pub struct PopulationSection {
    pub census: Vec<DepartmentCensus>,
    pub history: Vec<CensusYear>,
    pub intercensal: Vec<IntercensalRate>,
}

impl PopulationSection {
    pub fn load() -> Self {
        let total_2024: i64 = CENSUS.iter().map(|row| row.1).sum();

        let census = CENSUS
            .iter()
            .map(
                |&(department, population_2024, population_2012, surface_km2)| DepartmentCensus {
                    department,
                    population_2024,
                    population_2012,
                    surface_km2,
                    density: population_2024 as f64 / surface_km2 as f64,
                    absolute_growth: population_2024 - population_2012,
                    growth_pct: (population_2024 as f64 / population_2012 as f64 - 1.0) * 100.0,
                    share_pct: population_2024 as f64 / total_2024 as f64 * 100.0,
                },
            )
            .collect();

        let history = HISTORY
            .iter()
            .enumerate()
            .map(|(i, &(year, population))| {
                let previous = (i > 0).then(|| HISTORY[i - 1].1);
                CensusYear {
                    year,
                    population,
                    absolute_growth: previous.map(|prior| population - prior),
                    growth_pct: previous
                        .map(|prior| (population as f64 / prior as f64 - 1.0) * 100.0),
                }
            })
            .collect();

        let intercensal = INTERCENSAL
            .iter()
            .map(|&(period, annual_rate_pct, span_years)| IntercensalRate {
                period,
                annual_rate_pct,
                span_years,
            })
            .collect();

        Self {
            census,
            history,
            intercensal,
        }
    }

    pub fn metrics(&self) -> Vec<MetricCard> {
        let surface_total: i64 = self.census.iter().map(|row| row.surface_km2).sum();
        let national_density = NATIONAL_POPULATION_2024 as f64 / surface_total as f64;
        let largest = self
            .census
            .iter()
            .max_by_key(|row| row.population_2024)
            .expect("census table is never empty");

        vec![
            MetricCard::new(
                "Población Total",
                group_thousands(NATIONAL_POPULATION_2024),
                "Censo 2024",
            ),
            MetricCard::new(
                "Crecimiento 2012-2024",
                format!(
                    "+{}",
                    group_thousands(NATIONAL_POPULATION_2024 - NATIONAL_POPULATION_2012)
                ),
                "habitantes",
            ),
            MetricCard::new(
                "Densidad Nacional",
                format!("{national_density:.2}"),
                "hab/km²",
            ),
            MetricCard::new(
                "Departamento Mayor",
                largest.department.label(),
                format!("{} hab.", group_thousands(largest.population_2024)),
            ),
        ]
    }

    pub fn charts(&self, departments: Option<&[Department]>) -> Vec<ChartSpec> {
        let selected = filter_labels(departments);
        let mut filtered: Vec<&DepartmentCensus> = self
            .census
            .iter()
            .filter(|row| selected.contains(&row.department))
            .collect();
        filtered.sort_by_key(|row| row.population_2024);

        let ranking = ChartSpec::categorical(
            "Población por Departamento 2024",
            ChartKind::Bar {
                orientation: BarOrientation::Horizontal,
                mode: BarMode::Grouped,
            },
            filtered
                .iter()
                .map(|row| row.department.label().to_string())
                .collect(),
            vec![Series::new(
                "Población 2024",
                filtered.iter().map(|row| row.population_2024 as f64).collect(),
            )],
        )
        .with_axis_titles("Población", "");

        let distribution = ChartSpec::categorical(
            "Distribución Poblacional",
            ChartKind::Pie,
            filtered
                .iter()
                .map(|row| row.department.label().to_string())
                .collect(),
            vec![Series::new(
                "Población 2024",
                filtered.iter().map(|row| row.population_2024 as f64).collect(),
            )],
        );

        // The census comparison always shows the full country.
        let comparison = ChartSpec::categorical(
            "Comparación Poblacional 2012 vs 2024 por Departamento",
            ChartKind::Bar {
                orientation: BarOrientation::Vertical,
                mode: BarMode::Grouped,
            },
            self.census
                .iter()
                .map(|row| row.department.label().to_string())
                .collect(),
            vec![
                Series::new(
                    "2012",
                    self.census.iter().map(|row| row.population_2012 as f64).collect(),
                ),
                Series::new(
                    "2024",
                    self.census.iter().map(|row| row.population_2024 as f64).collect(),
                ),
            ],
        )
        .with_axis_titles("Departamento", "Población (habitantes)");

        let evolution = ChartSpec::categorical(
            "Evolución Poblacional de Bolivia (1950-2024)",
            ChartKind::Bar {
                orientation: BarOrientation::Vertical,
                mode: BarMode::Grouped,
            },
            self.history.iter().map(|row| row.year.to_string()).collect(),
            vec![Series::new(
                "Población",
                self.history.iter().map(|row| row.population as f64).collect(),
            )],
        )
        .with_axis_titles("Año", "Población (habitantes)");

        let rates = ChartSpec::categorical(
            "Tasa Crecimiento Intercensal (%)",
            ChartKind::Line,
            self.intercensal.iter().map(|row| row.period.to_string()).collect(),
            vec![Series::new(
                "Tasa de Crecimiento",
                self.intercensal.iter().map(|row| row.annual_rate_pct).collect(),
            )],
        )
        .with_axis_titles("Período Intercensal", "Tasa de Crecimiento (%)");

        vec![ranking, distribution, comparison, evolution, rates]
    }

    pub fn tables(&self) -> Vec<Table> {
        let mut census = Table::new(
            "Poblacion",
            vec![
                "Departamento",
                "Población_2024",
                "Población_2012",
                "Crecimiento_Absoluto",
                "Crecimiento_%",
                "Participación_%",
                "Superficie_km2",
                "Densidad",
            ],
        );
        for row in &self.census {
            census
                .push_row(vec![
                    Cell::text(row.department.label()),
                    Cell::int(row.population_2024),
                    Cell::int(row.population_2012),
                    Cell::int(row.absolute_growth),
                    Cell::float(row.growth_pct),
                    Cell::float(row.share_pct),
                    Cell::int(row.surface_km2),
                    Cell::float(row.density),
                ])
                .expect("census row matches headers");
        }

        let mut history = Table::new(
            "Evolucion_Historica",
            vec!["Año", "Población", "Crecimiento_Absoluto", "Crecimiento_%"],
        );
        for row in &self.history {
            history
                .push_row(vec![
                    Cell::int(row.year as i64),
                    Cell::int(row.population),
                    row.absolute_growth.map_or(Cell::text(""), Cell::int),
                    row.growth_pct.map_or(Cell::text(""), Cell::float),
                ])
                .expect("history row matches headers");
        }

        let mut intercensal = Table::new(
            "Tasas_Intercensales",
            vec!["Período", "Tasa_Crecimiento", "Años"],
        );
        for row in &self.intercensal {
            intercensal
                .push_row(vec![
                    Cell::text(row.period),
                    Cell::float(row.annual_rate_pct),
                    Cell::int(row.span_years),
                ])
                .expect("intercensal row matches headers");
        }

        vec![census, history, intercensal]
    }
}
