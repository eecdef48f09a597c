use std::io::Read;
use std::path::Path;

use crate::parser::date::{parse_header_date, HeaderDate};

/// Label of the time column in the header row. Blank header cells are filled
/// with it, and data cells containing only this label are not classes.
pub const TIME_LABEL: &str = "время";

/// One class taken from a schedule grid, before it gets a database id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRecord {
    pub group: String,
    pub month: i64,
    pub day: i64,
    pub time: String,
    pub info: String,
}

impl ClassRecord {
    pub fn date(&self) -> HeaderDate {
        HeaderDate {
            day: self.day,
            month: self.month,
        }
    }
}

/// Rectangular table of optional cells as exported from a schedule spreadsheet.
///
/// Row 0 holds dates, column 0 holds time slots, every other cell holds the
/// description of the class at that time and date (or nothing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<Option<String>>>,
}

impl Grid {
    /// Builds a grid from rows of cells. Short rows are padded with empty cells.
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();
        Self { rows }
    }

    /// Reads a CSV export. The export's first line carries the sheet's own
    /// column labels and is skipped; the line after it becomes header row 0.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(
                record
                    .iter()
                    .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                    .collect(),
            );
        }

        Ok(Self::new(rows))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, csv::Error> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .and_then(|cell| cell.as_deref())
    }

    /// Drops spacer columns: every column whose header repeats column 0's
    /// header, with blank headers counted as [`TIME_LABEL`]. Columns 0 and 1
    /// always stay and the last column is always dropped.
    pub fn prune_columns(&mut self) {
        let width = self.width();
        let Some(header) = self.rows.first_mut() else {
            return;
        };
        if width == 0 {
            return;
        }

        for cell in header.iter_mut() {
            if cell.is_none() {
                *cell = Some(TIME_LABEL.to_string());
            }
        }

        let first = header[0].clone();
        let mut keep: Vec<bool> = header.iter().map(|cell| *cell != first).collect();
        keep[0] = true;
        if width > 1 {
            keep[1] = true;
        }
        keep[width - 1] = false;

        for row in &mut self.rows {
            let mut column = 0;
            row.retain(|_| {
                let kept = keep[column];
                column += 1;
                kept
            });
        }
    }

    /// Time label for a data row. A blank time cell takes the label of the
    /// row above it (vertically merged slots).
    fn time_for_row(&self, row: usize) -> String {
        let own = normalize_cell(self.cell(row, 0));
        if !own.is_empty() || row == 0 {
            return own;
        }
        normalize_cell(self.cell(row - 1, 0))
    }

    /// Emits one record per non-empty data cell. Assumes columns are already pruned.
    pub fn records(&self, group: &str) -> Vec<ClassRecord> {
        let dates: Vec<_> = (0..self.width())
            .map(|column| parse_header_date(&normalize_cell(self.cell(0, column))))
            .collect();

        let mut records = Vec::new();
        for row in 1..self.height() {
            let time = self.time_for_row(row);
            for (column, date) in dates.iter().enumerate().skip(1) {
                let info = normalize_cell(self.cell(row, column));
                if info.is_empty() || info == TIME_LABEL {
                    continue;
                }
                records.push(ClassRecord {
                    group: group.to_string(),
                    month: date.month,
                    day: date.day,
                    time: time.clone(),
                    info,
                });
            }
        }
        records
    }
}

/// Collapses line breaks and runs of double spaces inside a cell into single
/// spaces. A missing cell becomes the empty string.
///
/// ```
/// use teacher_finder_bot::parser::normalize_cell;
///
/// assert_eq!(normalize_cell(Some("  Лекция  \n  ауд. 301  ")), "Лекция ауд. 301");
/// assert_eq!(normalize_cell(None), "");
/// ```
pub fn normalize_cell(cell: Option<&str>) -> String {
    let Some(text) = cell else {
        return String::new();
    };

    text.split('\n')
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prunes the grid's spacer columns and returns the classes of one group.
pub fn parse_grid(mut grid: Grid, group: &str) -> Vec<ClassRecord> {
    grid.prune_columns();
    grid.records(group)
}
