use super::{ExportBundle, ExportError};
use crate::tables::Cell;
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};

/// Excel caps worksheet names at 31 characters.
const MAX_SHEET_NAME: usize = 31;

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x4472C4))
}

fn sheet_name(name: &str) -> String {
    name.chars().take(MAX_SHEET_NAME).collect()
}

fn write_header(
    sheet: &mut Worksheet,
    columns: &[String],
    format: &Format,
) -> Result<(), ExportError> {
    for (col, column) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, column, format)?;
    }
    Ok(())
}

/// Build the workbook in memory: a `Resumen` sheet describing every entry,
/// then one worksheet per table. An empty bundle produces a workbook holding
/// only the summary header.
pub fn workbook_bytes(bundle: &ExportBundle) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header = header_format();
    let date = bundle.generated_on.format("%Y-%m-%d").to_string();

    let summary = workbook.add_worksheet();
    summary.set_name("Resumen")?;
    let summary_columns = [
        "Sección".to_string(),
        "Descripción".to_string(),
        "Registros".to_string(),
        "Fecha_Actualización".to_string(),
    ];
    write_header(summary, &summary_columns, &header)?;
    for (i, entry) in bundle.entries().iter().enumerate() {
        let row = (i + 1) as u32;
        summary.write_string(row, 0, &entry.name)?;
        summary.write_string(row, 1, format!("Datos de {}", entry.name))?;
        summary.write_number(row, 2, entry.table.row_count() as f64)?;
        summary.write_string(row, 3, &date)?;
    }

    for entry in bundle.entries() {
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name(&entry.name))?;
        write_header(sheet, entry.table.columns(), &header)?;
        for (r, table_row) in entry.table.rows().iter().enumerate() {
            let row = (r + 1) as u32;
            for (c, cell) in table_row.iter().enumerate() {
                let col = c as u16;
                match cell {
                    Cell::Text(value) => sheet.write_string(row, col, value)?,
                    Cell::Int(value) => sheet.write_number(row, col, *value as f64)?,
                    Cell::Float(value) => sheet.write_number(row, col, *value)?,
                };
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportBundle;
    use crate::tables::Table;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date")
    }

    #[test]
    fn empty_bundle_still_produces_a_workbook() {
        let bundle = ExportBundle::new(date());
        let bytes = workbook_bytes(&bundle).expect("workbook builds");
        // xlsx files are zip archives: PK magic.
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn long_table_names_fit_excel_limits() {
        let mut bundle = ExportBundle::new(date());
        let mut table = Table::new(
            "Una_Tabla_Con_Un_Nombre_Demasiado_Largo_Para_Excel",
            vec!["Valor"],
        );
        table
            .push_row(vec![Cell::int(1)])
            .expect("row matches arity");
        bundle.push(table);

        let bytes = workbook_bytes(&bundle).expect("workbook builds despite long name");
        assert!(!bytes.is_empty());
    }

    #[test]
    fn sheet_names_truncate_at_thirty_one_chars() {
        let name = sheet_name("Una_Tabla_Con_Un_Nombre_Demasiado_Largo");
        assert_eq!(name.chars().count(), 31);
    }
}
