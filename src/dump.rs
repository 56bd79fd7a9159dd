//! Plain text output for scripting: variable listings and tab-separated rows.

use crate::data::{ArraySource, VariableInfo};
use crate::error::Result;
use crate::table::{PagedTable, TableView};
use std::io::Write;
use std::ops::Range;

/// Describe a variable as `type name(dim, ...)`.
pub fn describe_variable(variable: &VariableInfo) -> String {
    let dims: Vec<&str> = variable
        .public_dimensions()
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    let mut line = format!("{} {}({})", variable.type_string(), variable.name, dims.join(", "));
    if let Some(description) = variable.description() {
        line.push_str(" ; ");
        line.push_str(description);
    }
    line
}

/// Write one line per variable in the source.
pub fn write_variables(source: &dyn ArraySource, out: &mut impl Write) -> Result<()> {
    for variable in source.variables()? {
        writeln!(out, "{}", describe_variable(&variable))?;
    }
    Ok(())
}

/// Write the column labels as a tab-separated line.
pub fn write_header(view: &TableView, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", view.labels().join("\t"))?;
    Ok(())
}

/// Write a range of table rows as tab-separated lines.
pub fn write_rows(view: &TableView, rows: Range<usize>, out: &mut impl Write) -> Result<()> {
    for row in rows {
        let cells: Vec<String> = view.row(row)?.iter().map(ToString::to_string).collect();
        writeln!(out, "{}", cells.join("\t"))?;
    }
    Ok(())
}

/// Write the header and every row of the current page.
pub fn write_page(table: &PagedTable, out: &mut impl Write) -> Result<()> {
    write_header(table.view(), out)?;
    let pager = table.pager();
    let rows = match pager.global_row(0) {
        Some(start) => start..start + pager.rows_on_current_page(),
        None => 0..0,
    };
    write_rows(table.view(), rows, out)
}

/// Write the header and every row of the table.
pub fn write_table(view: &TableView, out: &mut impl Write) -> Result<()> {
    write_header(view, out)?;
    write_rows(view, 0..view.row_count(), out)
}
