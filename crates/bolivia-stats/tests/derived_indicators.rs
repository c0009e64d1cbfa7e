use bolivia_stats::sections::population::PopulationSection;
use bolivia_stats::sections::{section_tables, section_view, Department, Section};

#[test]
fn density_follows_population_over_surface_everywhere() {
    let section = PopulationSection::load();
    for row in &section.census {
        let expected = row.population_2024 as f64 / row.surface_km2 as f64;
        assert!(
            (row.density - expected).abs() < 1e-9,
            "density mismatch for {}",
            row.department.label()
        );
    }
}

#[test]
fn santa_cruz_density_is_the_published_example() {
    let section = PopulationSection::load();
    let santa_cruz = section
        .census
        .iter()
        .find(|row| row.department == Department::SantaCruz)
        .expect("Santa Cruz present");
    assert_eq!(santa_cruz.population_2024, 3_115_386);
    assert_eq!(santa_cruz.surface_km2, 370_621);
    assert!((santa_cruz.density - 8.41).abs() < 0.005);
}

#[test]
fn participation_shares_total_one_hundred_percent() {
    let section = PopulationSection::load();
    let total: f64 = section.census.iter().map(|row| row.share_pct).sum();
    assert!((total - 100.0).abs() < 1e-6);
}

#[test]
fn growth_percentage_follows_census_ratio() {
    let section = PopulationSection::load();
    for row in &section.census {
        let expected = (row.population_2024 as f64 / row.population_2012 as f64 - 1.0) * 100.0;
        assert!((row.growth_pct - expected).abs() < 1e-9);
    }
}

#[test]
fn every_section_table_aggregates_its_key_column() {
    // sum/mean/min/max must work on the first numeric column of every
    // exported table; text-only or blank-bearing columns are exercised by the
    // unit tests.
    let population = section_tables(Section::Population);
    let census = &population[0];
    assert!(census.sum("Población_2024").expect("sum works") > 11_000_000.0);
    assert!(census.max("Densidad").expect("max works") > 36.0);
    assert!(census.min("Superficie_km2").expect("min works") >= 37_623.0);

    let electoral = section_tables(Section::Electoral);
    let mean = electoral[0]
        .mean("Porcentaje_Habilitados")
        .expect("mean works");
    assert!(mean > 95.0 && mean < 100.0);
}

#[test]
fn department_filters_only_touch_territorial_charts() {
    let filter = [Department::Tarija];
    let filtered = section_view(Section::Population, Some(&filter), false);
    assert_eq!(filtered.charts[0].len(), 1);

    let mortality = section_view(Section::Mortality, Some(&filter), false);
    let unfiltered = section_view(Section::Mortality, None, false);
    assert_eq!(mortality.charts.len(), unfiltered.charts.len());
    assert_eq!(mortality.charts[0].len(), unfiltered.charts[0].len());
}

#[test]
fn an_empty_filter_means_no_filter() {
    let all = section_view(Section::Fertility, None, false);
    let empty = section_view(Section::Fertility, Some(&[]), false);
    assert_eq!(all.charts[0].len(), empty.charts[0].len());
}
