use super::MetricCard;
use crate::charts::{BarMode, BarOrientation, ChartKind, ChartSpec, Series};
use crate::tables::{group_thousands, Cell, Table};

/// Registered deaths 2012-2023: (year, deaths, crude rate ‰, life expectancy
/// at birth). The 2020/2021 spike is the pandemic.
const YEARLY: [(i32, i64, f64, f64); 12] = [
    (2012, 81_092, 7.84, 69.8),
    (2013, 81_778, 7.78, 69.9),
    (2014, 82_468, 7.73, 70.1),
    (2015, 82_947, 7.66, 70.3),
    (2016, 83_678, 7.61, 70.5),
    (2017, 84_640, 7.59, 70.7),
    (2018, 87_015, 7.56, 70.9),
    (2019, 88_177, 7.56, 71.1),
    (2020, 128_041, 10.84, 70.8),
    (2021, 140_753, 11.79, 70.6),
    (2022, 92_765, 7.68, 70.9),
    (2023, 87_815, 7.17, 71.2),
];

#[derive(Debug, Clone)]
pub struct MortalityYear {
    pub year: i32,
    pub deaths: i64,
    pub rate_per_mil: f64,
    pub life_expectancy: f64,
    pub rate_change: Option<f64>,
    pub life_expectancy_change: Option<f64>,
}

#[derive(Debug)]
pub struct MortalitySection {
    pub yearly: Vec<MortalityYear>,
}

impl MortalitySection {
    pub fn load() -> Self {
        let yearly = YEARLY
            .iter()
            .enumerate()
            .map(|(i, &(year, deaths, rate_per_mil, life_expectancy))| MortalityYear {
                year,
                deaths,
                rate_per_mil,
                life_expectancy,
                rate_change: (i > 0).then(|| rate_per_mil - YEARLY[i - 1].2),
                life_expectancy_change: (i > 0).then(|| life_expectancy - YEARLY[i - 1].3),
            })
            .collect();
        Self { yearly }
    }

    fn latest(&self) -> &MortalityYear {
        self.yearly.last().expect("mortality series is never empty")
    }

    pub fn metrics(&self) -> Vec<MetricCard> {
        let latest = self.latest();
        let previous = &self.yearly[self.yearly.len() - 2];
        let trend = if latest.rate_per_mil < previous.rate_per_mil {
            "↓"
        } else {
            "↑"
        };

        let baseline_2019 = self
            .yearly
            .iter()
            .find(|row| row.year == 2019)
            .expect("2019 is in the series");
        let peak = self
            .yearly
            .iter()
            .max_by_key(|row| row.deaths)
            .expect("mortality series is never empty");
        let excess_pct =
            (peak.deaths - baseline_2019.deaths) as f64 / baseline_2019.deaths as f64 * 100.0;

        vec![
            MetricCard::new(
                "Mortalidad General",
                format!("{:.2}‰", latest.rate_per_mil),
                format!("{} {trend}", latest.year),
            ),
            MetricCard::new(
                "Esperanza de Vida",
                format!("{:.1}", latest.life_expectancy),
                "años",
            ),
            MetricCard::new(
                "Defunciones",
                group_thousands(latest.deaths),
                format!("{}", latest.year),
            ),
            MetricCard::new(
                "Exceso Pandémico",
                format!("+{excess_pct:.1}%"),
                format!("{} vs 2019", peak.year),
            ),
        ]
    }

    pub fn charts(&self) -> Vec<ChartSpec> {
        let years: Vec<String> = self.yearly.iter().map(|row| row.year.to_string()).collect();

        let rate = ChartSpec::categorical(
            "Evolución de la Mortalidad General",
            ChartKind::Line,
            years.clone(),
            vec![Series::new(
                "Tasa de Mortalidad",
                self.yearly.iter().map(|row| row.rate_per_mil).collect(),
            )],
        )
        .with_axis_titles("Año", "Mortalidad ‰");

        let life = ChartSpec::categorical(
            "Evolución de la Esperanza de Vida",
            ChartKind::Line,
            years.clone(),
            vec![Series::new(
                "Esperanza de Vida",
                self.yearly.iter().map(|row| row.life_expectancy).collect(),
            )],
        )
        .with_axis_titles("Año", "Años");

        let deaths = ChartSpec::categorical(
            "Defunciones por Año",
            ChartKind::Bar {
                orientation: BarOrientation::Vertical,
                mode: BarMode::Grouped,
            },
            years.clone(),
            vec![Series::new(
                "Defunciones",
                self.yearly.iter().map(|row| row.deaths as f64).collect(),
            )],
        )
        .with_axis_titles("Año", "Defunciones");

        let comparison = ChartSpec::categorical(
            "Comparación Normalizada: Mortalidad vs Esperanza de Vida",
            ChartKind::Line,
            years,
            vec![
                Series::new(
                    "Mortalidad (normalizada)",
                    normalize(self.yearly.iter().map(|row| row.rate_per_mil).collect()),
                ),
                Series::new(
                    "Esperanza de Vida (normalizada)",
                    normalize(self.yearly.iter().map(|row| row.life_expectancy).collect()),
                ),
            ],
        )
        .with_axis_titles("Año", "Valor Normalizado (0-100)");

        vec![rate, life, deaths, comparison]
    }

    pub fn tables(&self) -> Vec<Table> {
        let mut table = Table::new(
            "Mortalidad",
            vec![
                "Año",
                "Defunciones",
                "Tasa_Mortalidad",
                "Cambio_Tasa",
                "Esperanza_Vida",
                "Cambio_Esperanza",
            ],
        );
        for row in &self.yearly {
            table
                .push_row(vec![
                    Cell::int(row.year as i64),
                    Cell::int(row.deaths),
                    Cell::float(row.rate_per_mil),
                    row.rate_change.map_or(Cell::text(""), Cell::float),
                    Cell::float(row.life_expectancy),
                    row.life_expectancy_change.map_or(Cell::text(""), Cell::float),
                ])
                .expect("mortality row matches headers");
        }
        vec![table]
    }
}

/// Min-max scale a series to 0-100 so two indicators with different units can
/// share one axis.
fn normalize(values: Vec<f64>) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    if span == 0.0 {
        return vec![0.0; values.len()];
    }
    values.into_iter().map(|v| (v - min) / span * 100.0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_columns_are_year_over_year_differences() {
        let section = MortalitySection::load();
        assert!(section.yearly[0].rate_change.is_none());
        for window in section.yearly.windows(2) {
            let change = window[1].rate_change.expect("change defined after first year");
            assert!((change - (window[1].rate_per_mil - window[0].rate_per_mil)).abs() < 1e-9);
        }
    }

    #[test]
    fn metrics_reflect_latest_year_and_pandemic_peak() {
        let metrics = MortalitySection::load().metrics();
        assert_eq!(metrics[0].value, "7.17‰");
        assert_eq!(metrics[0].caption, "2023 ↓");
        assert_eq!(metrics[1].value, "71.2");
        assert_eq!(metrics[2].value, "87,815");
        assert!(metrics[3].caption.starts_with("2021"));
    }

    #[test]
    fn normalization_spans_zero_to_one_hundred() {
        let section = MortalitySection::load();
        let charts = section.charts();
        match &charts[3].data {
            crate::charts::ChartData::Categorical { series, .. } => {
                for one in series {
                    let min = one.values.iter().copied().fold(f64::INFINITY, f64::min);
                    let max = one.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                    assert!((min - 0.0).abs() < 1e-9);
                    assert!((max - 100.0).abs() < 1e-9);
                }
            }
            _ => panic!("comparison chart is categorical"),
        }
    }

    #[test]
    fn flat_series_normalizes_to_zero() {
        assert_eq!(normalize(vec![3.0, 3.0, 3.0]), vec![0.0, 0.0, 0.0]);
    }
}
