use super::MetricCard;
use crate::charts::{BarMode, BarOrientation, ChartKind, ChartSpec, Series};
use crate::tables::{Cell, Table};

/// EPA II trimester 2024 unemployment rates by category: (category, total %,
/// men %, women %).
const RATES: [(&str, f64, f64, f64); 5] = [
    ("Tasa de desempleo (EPA)", 2.8, 2.3, 3.3),
    ("Paro menores de 25 años", 4.3, 3.8, 4.9),
    ("Paro mayores de 24 años", 2.4, 1.9, 3.0),
    ("Paro entre 25 y 54 años", 2.9, 2.2, 3.8),
    ("Paro mayores de 54 años", 1.0, 1.3, 0.6),
];

/// Unemployed counts in thousands: (category, total, men, women).
const COUNTS: [(&str, i64, i64, i64); 5] = [
    ("Parados", 195, 84, 111),
    ("Parados menores de 25 años", 56, 27, 29),
    ("Parados mayores de 24 años", 139, 57, 82),
    ("Paro entre 25 y 54 años", 125, 47, 78),
    ("Parados mayores de 55 años", 14, 10, 4),
];

/// Annual EPA comparison: (year, total %, men %, women %, under-25 %,
/// over-24 %).
const HISTORY: [(i32, f64, f64, f64, f64, f64); 2] = [
    (2022, 3.3, 2.9, 3.7, 5.6, 2.7),
    (2023, 2.9, 2.6, 3.2, 4.6, 2.4),
];

#[derive(Debug, Clone)]
pub struct RateBySex {
    pub category: &'static str,
    pub total_pct: f64,
    pub men_pct: f64,
    pub women_pct: f64,
}

#[derive(Debug, Clone)]
pub struct CountBySex {
    pub category: &'static str,
    pub total_thousands: i64,
    pub men_thousands: i64,
    pub women_thousands: i64,
}

#[derive(Debug, Clone)]
pub struct YearlyRates {
    pub year: i32,
    pub total_pct: f64,
    pub men_pct: f64,
    pub women_pct: f64,
    pub under_25_pct: f64,
    pub over_24_pct: f64,
}

#[derive(Debug)]
pub struct UnemploymentSection {
    pub rates: Vec<RateBySex>,
    pub counts: Vec<CountBySex>,
    pub history: Vec<YearlyRates>,
}

impl UnemploymentSection {
    pub fn load() -> Self {
        Self {
            rates: RATES
                .iter()
                .map(|&(category, total_pct, men_pct, women_pct)| RateBySex {
                    category,
                    total_pct,
                    men_pct,
                    women_pct,
                })
                .collect(),
            counts: COUNTS
                .iter()
                .map(
                    |&(category, total_thousands, men_thousands, women_thousands)| CountBySex {
                        category,
                        total_thousands,
                        men_thousands,
                        women_thousands,
                    },
                )
                .collect(),
            history: HISTORY
                .iter()
                .map(
                    |&(year, total_pct, men_pct, women_pct, under_25_pct, over_24_pct)| {
                        YearlyRates {
                            year,
                            total_pct,
                            men_pct,
                            women_pct,
                            under_25_pct,
                            over_24_pct,
                        }
                    },
                )
                .collect(),
        }
    }

    pub fn metrics(&self) -> Vec<MetricCard> {
        let headline = &self.rates[0];
        let unemployed = &self.counts[0];

        vec![
            MetricCard::new(
                "Tasa de Desempleo",
                format!("{:.1}%", headline.total_pct),
                "EPA II Trim 2024",
            ),
            MetricCard::new(
                "Desempleo Hombres",
                format!("{:.1}%", headline.men_pct),
                "EPA 2024",
            ),
            MetricCard::new(
                "Desempleo Mujeres",
                format!("{:.1}%", headline.women_pct),
                "EPA 2024",
            ),
            MetricCard::new(
                "Total Parados",
                format!("{}k", unemployed.total_thousands),
                "personas desempleadas",
            ),
        ]
    }

    pub fn charts(&self) -> Vec<ChartSpec> {
        let grouped = ChartKind::Bar {
            orientation: BarOrientation::Vertical,
            mode: BarMode::Grouped,
        };

        let rates = ChartSpec::categorical(
            "Tasa de Paro por Sexo y Edad",
            grouped,
            self.rates.iter().map(|row| row.category.to_string()).collect(),
            vec![
                Series::new("Total", self.rates.iter().map(|row| row.total_pct).collect()),
                Series::new("Hombres", self.rates.iter().map(|row| row.men_pct).collect()),
                Series::new("Mujeres", self.rates.iter().map(|row| row.women_pct).collect()),
            ],
        )
        .with_axis_titles("", "Tasa de Paro (%)");

        let counts = ChartSpec::categorical(
            "Número de Desempleados",
            grouped,
            self.counts.iter().map(|row| row.category.to_string()).collect(),
            vec![
                Series::new(
                    "Total",
                    self.counts.iter().map(|row| row.total_thousands as f64).collect(),
                ),
                Series::new(
                    "Hombres",
                    self.counts.iter().map(|row| row.men_thousands as f64).collect(),
                ),
                Series::new(
                    "Mujeres",
                    self.counts.iter().map(|row| row.women_thousands as f64).collect(),
                ),
            ],
        )
        .with_axis_titles("", "Parados (miles)");

        let history = ChartSpec::categorical(
            "Evolución Histórica EPA Bolivia",
            grouped,
            vec![
                "Tasa desempleo (EPA)".to_string(),
                "Tasa desempleo hombres (EPA)".to_string(),
                "Tasa desempleo mujeres (EPA)".to_string(),
            ],
            self.history
                .iter()
                .map(|row| {
                    Series::new(
                        row.year.to_string(),
                        vec![row.total_pct, row.men_pct, row.women_pct],
                    )
                })
                .collect(),
        )
        .with_axis_titles("", "Tasa de Paro (%)");

        vec![rates, counts, history]
    }

    pub fn tables(&self) -> Vec<Table> {
        let mut rates = Table::new(
            "Desempleo_Tasas",
            vec!["Categoría", "Total_%", "Hombres_%", "Mujeres_%"],
        );
        for row in &self.rates {
            rates
                .push_row(vec![
                    Cell::text(row.category),
                    Cell::float(row.total_pct),
                    Cell::float(row.men_pct),
                    Cell::float(row.women_pct),
                ])
                .expect("rate row matches headers");
        }

        let mut counts = Table::new(
            "Desempleo_Parados",
            vec!["Categoría", "Total_miles", "Hombres_miles", "Mujeres_miles"],
        );
        for row in &self.counts {
            counts
                .push_row(vec![
                    Cell::text(row.category),
                    Cell::int(row.total_thousands),
                    Cell::int(row.men_thousands),
                    Cell::int(row.women_thousands),
                ])
                .expect("count row matches headers");
        }

        let mut history = Table::new(
            "Desempleo_Historico",
            vec![
                "Año",
                "Tasa_desempleo_EPA_%",
                "Tasa_desempleo_hombres_%",
                "Tasa_desempleo_mujeres_%",
                "Paro_menores_25_%",
                "Paro_mayores_24_%",
            ],
        );
        for row in &self.history {
            history
                .push_row(vec![
                    Cell::int(row.year as i64),
                    Cell::float(row.total_pct),
                    Cell::float(row.men_pct),
                    Cell::float(row.women_pct),
                    Cell::float(row.under_25_pct),
                    Cell::float(row.over_24_pct),
                ])
                .expect("history row matches headers");
        }

        vec![rates, counts, history]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headline_metrics_match_epa_release() {
        let metrics = UnemploymentSection::load().metrics();
        assert_eq!(metrics[0].value, "2.8%");
        assert_eq!(metrics[1].value, "2.3%");
        assert_eq!(metrics[2].value, "3.3%");
        assert_eq!(metrics[3].value, "195k");
    }

    #[test]
    fn sex_breakdowns_bracket_the_total_rate() {
        let section = UnemploymentSection::load();
        let headline = &section.rates[0];
        let lower = headline.men_pct.min(headline.women_pct);
        let upper = headline.men_pct.max(headline.women_pct);
        assert!(headline.total_pct >= lower && headline.total_pct <= upper);
    }

    #[test]
    fn unemployed_counts_split_by_sex() {
        let section = UnemploymentSection::load();
        for row in &section.counts {
            assert_eq!(
                row.total_thousands,
                row.men_thousands + row.women_thousands,
                "{}",
                row.category
            );
        }
    }

    #[test]
    fn history_chart_has_one_series_per_year() {
        let charts = UnemploymentSection::load().charts();
        let history = &charts[2];
        match &history.data {
            crate::charts::ChartData::Categorical { series, .. } => {
                assert_eq!(series.len(), 2);
                assert_eq!(series[0].name, "2022");
                assert_eq!(series[1].name, "2023");
            }
            _ => panic!("history chart is categorical"),
        }
    }
}
