use super::{filter_labels, Department, MetricCard};
use crate::charts::{BarMode, BarOrientation, ChartKind, ChartSpec, Series};
use crate::tables::{group_thousands, Cell, Table};

/// National 2024 headline figures.
const NATIONAL_TFR: f64 = 2.5;
const NATIONAL_INFANT_MORTALITY: f64 = 22.9;
const NATIONAL_BIRTH_RATE: f64 = 18.2;

/// Departmental fertility rows: (department, total fertility rate, births
/// 2024, infant mortality ‰, birth rate ‰).
const DEPARTMENTAL: [(Department, f64, i64, f64, f64); 9] = [
    (Department::SantaCruz, 2.9, 62_850, 22.5, 20.2),
    (Department::LaPaz, 2.1, 48_320, 18.7, 16.0),
    (Department::Cochabamba, 2.6, 35_670, 21.2, 17.8),
    (Department::Potosi, 3.8, 18_420, 28.9, 21.5),
    (Department::Chuquisaca, 3.4, 15_680, 26.4, 26.1),
    (Department::Tarija, 2.7, 12_450, 19.8, 23.3),
    (Department::Oruro, 3.2, 14_230, 25.3, 24.9),
    (Department::Beni, 4.1, 12_180, 31.2, 25.5),
    (Department::Pando, 4.5, 3_850, 35.6, 29.4),
];

/// National trend, even years 2010-2024: (year, TFR, birth rate ‰, infant
/// mortality ‰).
const TREND: [(i32, f64, f64, f64); 8] = [
    (2010, 3.5, 25.8, 42.0),
    (2012, 3.2, 24.2, 38.5),
    (2014, 3.0, 22.9, 35.2),
    (2016, 2.9, 21.8, 32.1),
    (2018, 2.8, 20.9, 29.4),
    (2020, 2.7, 19.8, 27.0),
    (2022, 2.6, 18.9, 24.8),
    (2024, 2.5, 18.2, 22.9),
];

/// Births by maternal age group: (group, rate per mil 2024, rate per mil
/// 2020, share of births %).
const MATERNAL_AGE: [(&str, f64, f64, f64); 7] = [
    ("15-19", 68.0, 72.0, 12.5),
    ("20-24", 142.0, 148.0, 28.8),
    ("25-29", 135.0, 140.0, 26.2),
    ("30-34", 108.0, 112.0, 19.8),
    ("35-39", 75.0, 78.0, 10.1),
    ("40-44", 32.0, 35.0, 2.4),
    ("45-49", 4.0, 5.0, 0.2),
];

#[derive(Debug, Clone)]
pub struct DepartmentFertility {
    pub department: Department,
    pub total_fertility_rate: f64,
    pub births_2024: i64,
    pub infant_mortality_per_mil: f64,
    pub birth_rate_per_mil: f64,
}

#[derive(Debug, Clone)]
pub struct FertilityTrendYear {
    pub year: i32,
    pub total_fertility_rate: f64,
    pub birth_rate_per_mil: f64,
    pub infant_mortality_per_mil: f64,
}

#[derive(Debug, Clone)]
pub struct MaternalAgeGroup {
    pub age_group: &'static str,
    pub rate_2024_per_mil: f64,
    pub rate_2020_per_mil: f64,
    pub births_share_pct: f64,
}

#[derive(Debug)]
pub struct FertilitySection {
    pub departmental: Vec<DepartmentFertility>,
    pub trend: Vec<FertilityTrendYear>,
    pub maternal_age: Vec<MaternalAgeGroup>,
}

impl FertilitySection {
    pub fn load() -> Self {
        Self {
            departmental: DEPARTMENTAL
                .iter()
                .map(|&(department, tfr, births, infant, birth_rate)| DepartmentFertility {
                    department,
                    total_fertility_rate: tfr,
                    births_2024: births,
                    infant_mortality_per_mil: infant,
                    birth_rate_per_mil: birth_rate,
                })
                .collect(),
            trend: TREND
                .iter()
                .map(|&(year, tfr, birth_rate, infant)| FertilityTrendYear {
                    year,
                    total_fertility_rate: tfr,
                    birth_rate_per_mil: birth_rate,
                    infant_mortality_per_mil: infant,
                })
                .collect(),
            maternal_age: MATERNAL_AGE
                .iter()
                .map(|&(age_group, rate_2024, rate_2020, share)| MaternalAgeGroup {
                    age_group,
                    rate_2024_per_mil: rate_2024,
                    rate_2020_per_mil: rate_2020,
                    births_share_pct: share,
                })
                .collect(),
        }
    }

    pub fn total_births(&self) -> i64 {
        self.departmental.iter().map(|row| row.births_2024).sum()
    }

    pub fn metrics(&self) -> Vec<MetricCard> {
        vec![
            MetricCard::new(
                "Tasa Fecundidad Global",
                format!("{NATIONAL_TFR:.1}"),
                "hijos por mujer",
            ),
            MetricCard::new(
                "Nacimientos 2024",
                group_thousands(self.total_births()),
                "total nacional",
            ),
            MetricCard::new(
                "Mortalidad Infantil",
                format!("{NATIONAL_INFANT_MORTALITY:.1}‰"),
                "por mil nacidos vivos",
            ),
            MetricCard::new(
                "Tasa de Natalidad",
                format!("{NATIONAL_BIRTH_RATE:.1}‰"),
                "por mil habitantes",
            ),
        ]
    }

    pub fn charts(&self, departments: Option<&[Department]>) -> Vec<ChartSpec> {
        let selected = filter_labels(departments);
        let mut filtered: Vec<&DepartmentFertility> = self
            .departmental
            .iter()
            .filter(|row| selected.contains(&row.department))
            .collect();
        filtered.sort_by(|a, b| {
            a.total_fertility_rate
                .partial_cmp(&b.total_fertility_rate)
                .expect("fertility rates are finite")
        });

        let tfr = ChartSpec::categorical(
            "Tasa Fecundidad Global por Departamento",
            ChartKind::Bar {
                orientation: BarOrientation::Horizontal,
                mode: BarMode::Grouped,
            },
            filtered
                .iter()
                .map(|row| row.department.label().to_string())
                .collect(),
            vec![Series::new(
                "Hijos por mujer",
                filtered.iter().map(|row| row.total_fertility_rate).collect(),
            )],
        )
        .with_axis_titles("Hijos por mujer", "");

        let births = ChartSpec::categorical(
            "Distribución de Nacimientos 2024",
            ChartKind::Pie,
            filtered
                .iter()
                .map(|row| row.department.label().to_string())
                .collect(),
            vec![Series::new(
                "Nacimientos",
                filtered.iter().map(|row| row.births_2024 as f64).collect(),
            )],
        );

        let years: Vec<String> = self.trend.iter().map(|row| row.year.to_string()).collect();

        let tfr_trend = ChartSpec::categorical(
            "Evolución Tasa Fecundidad Global",
            ChartKind::Line,
            years.clone(),
            vec![Series::new(
                "Tasa Fecundidad Global",
                self.trend.iter().map(|row| row.total_fertility_rate).collect(),
            )],
        )
        .with_axis_titles("Año", "Hijos por mujer");

        let rates_trend = ChartSpec::categorical(
            "Natalidad y Mortalidad Infantil (por mil)",
            ChartKind::Line,
            years,
            vec![
                Series::new(
                    "Tasa de Natalidad",
                    self.trend.iter().map(|row| row.birth_rate_per_mil).collect(),
                ),
                Series::new(
                    "Mortalidad Infantil",
                    self.trend
                        .iter()
                        .map(|row| row.infant_mortality_per_mil)
                        .collect(),
                ),
            ],
        )
        .with_axis_titles("Año", "Tasa (‰)");

        let by_age = ChartSpec::categorical(
            "Fecundidad por Edad de la Madre",
            ChartKind::Bar {
                orientation: BarOrientation::Vertical,
                mode: BarMode::Grouped,
            },
            self.maternal_age
                .iter()
                .map(|row| row.age_group.to_string())
                .collect(),
            vec![
                Series::new(
                    "2020",
                    self.maternal_age.iter().map(|row| row.rate_2020_per_mil).collect(),
                ),
                Series::new(
                    "2024",
                    self.maternal_age.iter().map(|row| row.rate_2024_per_mil).collect(),
                ),
            ],
        )
        .with_axis_titles("Grupo de Edad", "Tasa por mil mujeres");

        vec![tfr, births, tfr_trend, rates_trend, by_age]
    }

    pub fn tables(&self) -> Vec<Table> {
        let mut departmental = Table::new(
            "Fecundidad_Departamental",
            vec![
                "Departamento",
                "Tasa_Fecundidad_Global",
                "Nacimientos_2024",
                "Mortalidad_Infantil_x1000",
                "Tasa_Natalidad_x1000",
            ],
        );
        for row in &self.departmental {
            departmental
                .push_row(vec![
                    Cell::text(row.department.label()),
                    Cell::float(row.total_fertility_rate),
                    Cell::int(row.births_2024),
                    Cell::float(row.infant_mortality_per_mil),
                    Cell::float(row.birth_rate_per_mil),
                ])
                .expect("departmental row matches headers");
        }

        let mut trend = Table::new(
            "Fecundidad_Historica",
            vec![
                "Año",
                "Tasa_Fecundidad_Global",
                "Tasa_Natalidad_x1000",
                "Mortalidad_Infantil_x1000",
            ],
        );
        for row in &self.trend {
            trend
                .push_row(vec![
                    Cell::int(row.year as i64),
                    Cell::float(row.total_fertility_rate),
                    Cell::float(row.birth_rate_per_mil),
                    Cell::float(row.infant_mortality_per_mil),
                ])
                .expect("trend row matches headers");
        }

        let mut maternal = Table::new(
            "Fecundidad_Edad_Madre",
            vec![
                "Grupo_Edad",
                "Tasa_Fecundidad_2024",
                "Tasa_Fecundidad_2020",
                "Porcentaje_Nacimientos",
            ],
        );
        for row in &self.maternal_age {
            maternal
                .push_row(vec![
                    Cell::text(row.age_group),
                    Cell::float(row.rate_2024_per_mil),
                    Cell::float(row.rate_2020_per_mil),
                    Cell::float(row.births_share_pct),
                ])
                .expect("maternal age row matches headers");
        }

        vec![departmental, trend, maternal]
    }
}
