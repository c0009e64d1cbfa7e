use super::{filter_labels, Department, MetricCard};
use crate::charts::{BarMode, BarOrientation, ChartKind, ChartSpec, Series};
use crate::tables::{group_thousands, Cell, Table};

/// 2025 electoral roll per department: (department, eligible voters,
/// disqualified records, purged records, new registrations). TSE figures.
const ROLL: [(Department, i64, i64, i64, i64); 9] = [
    (Department::SantaCruz, 2_890_450, 45_120, 12_890, 125_680),
    (Department::LaPaz, 1_950_320, 32_890, 8_950, 89_450),
    (Department::Cochabamba, 1_520_680, 28_450, 7_230, 72_340),
    (Department::Potosi, 625_840, 18_950, 5_680, 35_670),
    (Department::Chuquisaca, 438_590, 15_670, 4_320, 28_950),
    (Department::Tarija, 367_280, 12_340, 3_170, 22_180),
    (Department::Oruro, 376_420, 14_580, 4_120, 26_340),
    (Department::Beni, 320_150, 11_230, 3_850, 18_950),
    (Department::Pando, 84_270, 3_240, 1_180, 6_890),
];

#[derive(Debug, Clone)]
pub struct VoterRoll {
    pub department: Department,
    pub eligible_2025: i64,
    pub disqualified: i64,
    pub purged: i64,
    pub new_registrations: i64,
    pub total_roll: i64,
    pub eligible_pct: f64,
    pub purge_rate_pct: f64,
    pub disqualification_rate_pct: f64,
}

#[derive(Debug)]
pub struct ElectoralSection {
    pub roll: Vec<VoterRoll>,
}

impl ElectoralSection {
    pub fn load() -> Self {
        let roll = ROLL
            .iter()
            .map(
                |&(department, eligible_2025, disqualified, purged, new_registrations)| {
                    let total_roll = eligible_2025 + disqualified;
                    VoterRoll {
                        department,
                        eligible_2025,
                        disqualified,
                        purged,
                        new_registrations,
                        total_roll,
                        eligible_pct: eligible_2025 as f64 / total_roll as f64 * 100.0,
                        purge_rate_pct: purged as f64 / total_roll as f64 * 100.0,
                        disqualification_rate_pct: disqualified as f64 / total_roll as f64 * 100.0,
                    }
                },
            )
            .collect();
        Self { roll }
    }

    pub fn metrics(&self) -> Vec<MetricCard> {
        let eligible: i64 = self.roll.iter().map(|row| row.eligible_2025).sum();
        let disqualified: i64 = self.roll.iter().map(|row| row.disqualified).sum();
        let purged: i64 = self.roll.iter().map(|row| row.purged).sum();
        let new_registrations: i64 = self.roll.iter().map(|row| row.new_registrations).sum();

        vec![
            MetricCard::new(
                "Habilitados 2025",
                group_thousands(eligible),
                "Votantes activos",
            ),
            MetricCard::new("Inhabilitados", group_thousands(disqualified), "Registros"),
            MetricCard::new("Depurados", group_thousands(purged), "Limpieza padrón"),
            MetricCard::new(
                "Nuevos Registros",
                group_thousands(new_registrations),
                "Jóvenes 2025",
            ),
        ]
    }

    pub fn charts(&self, departments: Option<&[Department]>) -> Vec<ChartSpec> {
        let selected = filter_labels(departments);
        let horizontal = ChartKind::Bar {
            orientation: BarOrientation::Horizontal,
            mode: BarMode::Grouped,
        };

        let mut by_eligible: Vec<&VoterRoll> = self
            .roll
            .iter()
            .filter(|row| selected.contains(&row.department))
            .collect();
        by_eligible.sort_by_key(|row| row.eligible_2025);

        let eligible = ChartSpec::categorical(
            "Votantes Habilitados por Departamento",
            horizontal,
            by_eligible
                .iter()
                .map(|row| row.department.label().to_string())
                .collect(),
            vec![Series::new(
                "Habilitados",
                by_eligible.iter().map(|row| row.eligible_2025 as f64).collect(),
            )],
        )
        .with_axis_titles("Votantes Habilitados", "");

        let mut by_pct = by_eligible.clone();
        by_pct.sort_by(|a, b| {
            a.eligible_pct
                .partial_cmp(&b.eligible_pct)
                .expect("eligibility percentages are finite")
        });

        let eligible_pct = ChartSpec::categorical(
            "Porcentaje de Habilitación",
            horizontal,
            by_pct
                .iter()
                .map(|row| row.department.label().to_string())
                .collect(),
            vec![Series::new(
                "% Habilitados",
                by_pct.iter().map(|row| row.eligible_pct).collect(),
            )],
        )
        .with_axis_titles("% Habilitados", "");

        let national: Vec<String> = self
            .roll
            .iter()
            .map(|row| row.department.label().to_string())
            .collect();

        let purged = ChartSpec::categorical(
            "Distribución de Registros Depurados",
            ChartKind::Pie,
            national.clone(),
            vec![Series::new(
                "Depurados",
                self.roll.iter().map(|row| row.purged as f64).collect(),
            )],
        );

        let new_voters = ChartSpec::categorical(
            "Jóvenes que Alcanzan Mayoría de Edad para Votar",
            ChartKind::Bar {
                orientation: BarOrientation::Vertical,
                mode: BarMode::Grouped,
            },
            national.clone(),
            vec![Series::new(
                "Nuevos Registros",
                self.roll.iter().map(|row| row.new_registrations as f64).collect(),
            )],
        )
        .with_axis_titles("Departamento", "Nuevos Registros");

        let composition = ChartSpec::categorical(
            "Composición del Padrón Electoral por Departamento",
            ChartKind::Bar {
                orientation: BarOrientation::Vertical,
                mode: BarMode::Stacked,
            },
            national.clone(),
            vec![
                Series::new(
                    "Habilitados",
                    self.roll.iter().map(|row| row.eligible_2025 as f64).collect(),
                ),
                Series::new(
                    "Inhabilitados",
                    self.roll.iter().map(|row| row.disqualified as f64).collect(),
                ),
            ],
        )
        .with_axis_titles("Departamento", "Número de Registros");

        let rates = ChartSpec::categorical(
            "Tasas de Depuración e Inhabilitación (%)",
            horizontal,
            national,
            vec![
                Series::new(
                    "Tasa de Depuración",
                    self.roll.iter().map(|row| row.purge_rate_pct).collect(),
                ),
                Series::new(
                    "Tasa de Inhabilitación",
                    self.roll
                        .iter()
                        .map(|row| row.disqualification_rate_pct)
                        .collect(),
                ),
            ],
        )
        .with_axis_titles("Tasa (%)", "");

        vec![eligible, eligible_pct, purged, new_voters, composition, rates]
    }

    pub fn tables(&self) -> Vec<Table> {
        let mut table = Table::new(
            "Datos_Electorales",
            vec![
                "Departamento",
                "Habilitados_2025",
                "Inhabilitados",
                "Depurados",
                "Nuevos_Registros",
                "Total_Padrón",
                "Porcentaje_Habilitados",
            ],
        );
        for row in &self.roll {
            table
                .push_row(vec![
                    Cell::text(row.department.label()),
                    Cell::int(row.eligible_2025),
                    Cell::int(row.disqualified),
                    Cell::int(row.purged),
                    Cell::int(row.new_registrations),
                    Cell::int(row.total_roll),
                    Cell::float(row.eligible_pct),
                ])
                .expect("roll row matches headers");
        }
        vec![table]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_totals_are_sums_of_components() {
        let section = ElectoralSection::load();
        for row in &section.roll {
            assert_eq!(row.total_roll, row.eligible_2025 + row.disqualified);
            let recomputed = row.eligible_2025 as f64 / row.total_roll as f64 * 100.0;
            assert!((row.eligible_pct - recomputed).abs() < 1e-9);
            assert!(
                (row.eligible_pct + row.disqualification_rate_pct - 100.0).abs() < 1e-9,
                "{:?}",
                row.department
            );
        }
    }

    #[test]
    fn national_metrics_sum_departments() {
        let metrics = ElectoralSection::load().metrics();
        assert_eq!(metrics[0].value, "8,574,000");
        assert_eq!(metrics[1].value, "182,470");
        assert_eq!(metrics[2].value, "51,390");
        assert_eq!(metrics[3].value, "426,450");
    }

    #[test]
    fn composition_chart_is_stacked() {
        let charts = ElectoralSection::load().charts(None);
        assert!(matches!(
            charts[4].kind,
            ChartKind::Bar {
                mode: BarMode::Stacked,
                ..
            }
        ));
    }
}
