use super::{ExportBundle, ExportError};
use crate::tables::{Cell, Table};

fn field(cell: &Cell) -> String {
    match cell {
        Cell::Text(value) => value.clone(),
        Cell::Int(value) => value.to_string(),
        Cell::Float(value) => value.to_string(),
    }
}

/// Serialize one table to delimited text, header row first.
pub fn table_to_csv(table: &Table) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| field(cell)))?;
    }
    let buffer = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8(buffer)?)
}

/// Serialize the whole bundle: one block per table, each with its own header
/// row plus a trailing `Sección` column naming the entry. An empty bundle
/// yields an empty string.
pub fn combined_csv(bundle: &ExportBundle) -> Result<String, ExportError> {
    // Blocks have different widths, so the writer must not enforce a uniform
    // record length.
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    for entry in bundle.entries() {
        let mut header: Vec<String> = entry.table.columns().to_vec();
        header.push("Sección".to_string());
        writer.write_record(&header)?;

        for row in entry.table.rows() {
            let mut record: Vec<String> = row.iter().map(|cell| field(cell)).collect();
            record.push(entry.name.clone());
            writer.write_record(&record)?;
        }
    }
    let buffer = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8(buffer)?)
}

/// Parse delimited text back into a table. Fields that read as integers or
/// floats come back typed; everything else stays text.
pub fn table_from_csv(name: &str, data: &str) -> Result<Table, ExportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|column| column.to_string())
        .collect();
    let mut table = Table::new(name, columns);

    for record in reader.records() {
        let record = record?;
        let row = record
            .iter()
            .map(|value| {
                if let Ok(int) = value.parse::<i64>() {
                    Cell::Int(int)
                } else if let Ok(float) = value.parse::<f64>() {
                    Cell::Float(float)
                } else {
                    Cell::text(value)
                }
            })
            .collect();
        table.push_row(row)?;
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportBundle;
    use chrono::NaiveDate;

    fn sample() -> Table {
        let mut table = Table::new("Poblacion", vec!["Departamento", "Población_2024", "Densidad"]);
        table
            .push_row(vec![
                Cell::text("Santa Cruz"),
                Cell::int(3_115_386),
                Cell::float(8.41),
            ])
            .expect("row matches arity");
        table
            .push_row(vec![
                Cell::text("La Paz"),
                Cell::int(3_022_566),
                Cell::float(22.56),
            ])
            .expect("row matches arity");
        table
    }

    #[test]
    fn round_trip_preserves_shape_and_values() {
        let table = sample();
        let text = table_to_csv(&table).expect("serializes");
        let parsed = table_from_csv("Poblacion", &text).expect("parses back");

        assert_eq!(parsed.row_count(), table.row_count());
        assert_eq!(parsed.columns(), table.columns());
        assert_eq!(parsed.rows()[0][1], Cell::Int(3_115_386));
        assert_eq!(parsed.rows()[0][2], Cell::Float(8.41));
    }

    #[test]
    fn combined_csv_appends_section_column() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date");
        let mut bundle = ExportBundle::new(date);
        bundle.push(sample());
        let text = combined_csv(&bundle).expect("serializes");

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Departamento,Población_2024,Densidad,Sección")
        );
        assert_eq!(lines.next(), Some("Santa Cruz,3115386,8.41,Poblacion"));
    }

    #[test]
    fn empty_bundle_yields_empty_output() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date");
        let bundle = ExportBundle::new(date);
        let text = combined_csv(&bundle).expect("serializes");
        assert!(text.is_empty());
    }

    #[test]
    fn header_only_table_round_trips_to_zero_rows() {
        let table = Table::new("Vacia", vec!["Columna_A", "Columna_B"]);
        let text = table_to_csv(&table).expect("serializes");
        let parsed = table_from_csv("Vacia", &text).expect("parses back");
        assert_eq!(parsed.row_count(), 0);
        assert_eq!(parsed.columns(), table.columns());
    }
}
