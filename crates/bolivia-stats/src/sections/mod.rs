pub mod education;
pub mod electoral;
pub mod fertility;
pub mod mortality;
pub mod population;
pub mod unemployment;

use crate::charts::ChartSpec;
use crate::tables::Table;
use serde::Serialize;
use std::str::FromStr;

/// One self-contained statistical topic with its own data, metric cards,
/// chart specs and tabular views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Population,
    Unemployment,
    Fertility,
    Mortality,
    Electoral,
    Education,
}

impl Section {
    pub fn ordered() -> Vec<Section> {
        vec![
            Section::Population,
            Section::Unemployment,
            Section::Fertility,
            Section::Mortality,
            Section::Electoral,
            Section::Education,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Section::Population => "Población",
            Section::Unemployment => "Empleo y Paro",
            Section::Fertility => "Fecundidad y Natalidad",
            Section::Mortality => "Mortalidad y Esperanza de Vida",
            Section::Electoral => "Datos Electorales 2025",
            Section::Education => "Educación",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Section::Population => "population",
            Section::Unemployment => "unemployment",
            Section::Fertility => "fertility",
            Section::Mortality => "mortality",
            Section::Electoral => "electoral",
            Section::Education => "education",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SectionError {
    #[error("unknown section '{slug}'")]
    Unknown { slug: String },
    #[error("section '{slug}' is disabled in this deployment")]
    Disabled { slug: String },
}

impl FromStr for Section {
    type Err = SectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Section::ordered()
            .into_iter()
            .find(|section| section.slug() == value)
            .ok_or_else(|| SectionError::Unknown {
                slug: value.to_string(),
            })
    }
}

/// The nine departments every territorial table is keyed by, in the census
/// ordering the INE publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Department {
    SantaCruz,
    LaPaz,
    Cochabamba,
    Potosi,
    Chuquisaca,
    Tarija,
    Oruro,
    Beni,
    Pando,
}

impl Department {
    pub fn ordered() -> Vec<Department> {
        vec![
            Department::SantaCruz,
            Department::LaPaz,
            Department::Cochabamba,
            Department::Potosi,
            Department::Chuquisaca,
            Department::Tarija,
            Department::Oruro,
            Department::Beni,
            Department::Pando,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Department::SantaCruz => "Santa Cruz",
            Department::LaPaz => "La Paz",
            Department::Cochabamba => "Cochabamba",
            Department::Potosi => "Potosí",
            Department::Chuquisaca => "Chuquisaca",
            Department::Tarija => "Tarija",
            Department::Oruro => "Oruro",
            Department::Beni => "Beni",
            Department::Pando => "Pando",
        }
    }

    pub fn from_label(value: &str) -> Option<Department> {
        Department::ordered()
            .into_iter()
            .find(|department| department.label().eq_ignore_ascii_case(value.trim()))
    }
}

/// A single labeled summary number for the dashboard header area.
#[derive(Debug, Clone, Serialize)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    pub caption: String,
}

impl MetricCard {
    pub fn new(
        label: impl Into<String>,
        value: impl Into<String>,
        caption: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            caption: caption.into(),
        }
    }
}

/// Everything one section renders, ready for serialization.
#[derive(Debug, Serialize)]
pub struct SectionView {
    pub section: Section,
    pub label: &'static str,
    pub metrics: Vec<MetricCard>,
    pub charts: Vec<ChartSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<Table>>,
}

/// Build the view for one section. `departments` narrows department-keyed
/// charts; sections without territorial charts ignore it.
pub fn section_view(
    section: Section,
    departments: Option<&[Department]>,
    include_tables: bool,
) -> SectionView {
    let (metrics, charts, tables) = match section {
        Section::Population => {
            let data = population::PopulationSection::load();
            (data.metrics(), data.charts(departments), data.tables())
        }
        Section::Unemployment => {
            let data = unemployment::UnemploymentSection::load();
            (data.metrics(), data.charts(), data.tables())
        }
        Section::Fertility => {
            let data = fertility::FertilitySection::load();
            (data.metrics(), data.charts(departments), data.tables())
        }
        Section::Mortality => {
            let data = mortality::MortalitySection::load();
            (data.metrics(), data.charts(), data.tables())
        }
        Section::Electoral => {
            let data = electoral::ElectoralSection::load();
            (data.metrics(), data.charts(departments), data.tables())
        }
        Section::Education => {
            let data = education::EducationSection::load();
            (data.metrics(), data.charts(departments), data.tables())
        }
    };

    SectionView {
        section,
        label: section.label(),
        metrics,
        charts,
        tables: include_tables.then_some(tables),
    }
}

/// The tables a section contributes to the export bundle, keyed by the
/// worksheet/report name they export under.
pub fn section_tables(section: Section) -> Vec<Table> {
    match section {
        Section::Population => population::PopulationSection::load().tables(),
        Section::Unemployment => unemployment::UnemploymentSection::load().tables(),
        Section::Fertility => fertility::FertilitySection::load().tables(),
        Section::Mortality => mortality::MortalitySection::load().tables(),
        Section::Electoral => electoral::ElectoralSection::load().tables(),
        Section::Education => education::EducationSection::load().tables(),
    }
}

pub(crate) fn filter_labels(departments: Option<&[Department]>) -> Vec<Department> {
    match departments {
        Some(selected) if !selected.is_empty() => selected.to_vec(),
        _ => Department::ordered(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip() {
        for section in Section::ordered() {
            let parsed: Section = section.slug().parse().expect("slug parses");
            assert_eq!(parsed, section);
        }
        assert!(matches!(
            "weather".parse::<Section>(),
            Err(SectionError::Unknown { .. })
        ));
    }

    #[test]
    fn departments_parse_from_labels() {
        assert_eq!(
            Department::from_label(" santa cruz "),
            Some(Department::SantaCruz)
        );
        assert_eq!(Department::from_label("Potosí"), Some(Department::Potosi));
        assert_eq!(Department::from_label("Madrid"), None);
    }

    #[test]
    fn every_section_produces_a_view() {
        for section in Section::ordered() {
            let view = section_view(section, None, true);
            assert!(!view.metrics.is_empty(), "{:?} has metric cards", section);
            assert!(!view.charts.is_empty(), "{:?} has charts", section);
            let tables = view.tables.expect("tables requested");
            assert!(!tables.is_empty(), "{:?} has tables", section);
            assert!(tables.iter().all(|table| !table.is_empty()));
        }
    }

    #[test]
    fn tables_can_be_omitted() {
        let view = section_view(Section::Population, None, false);
        assert!(view.tables.is_none());
    }
}
