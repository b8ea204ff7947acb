//! Timing tables on disk.
//!
//! A table is `label, dijkstra, bellman-ford` per row. The header row is
//! optional; when present its columns are found by name, otherwise the
//! columns are taken by position.

use std::{fs::File, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use log::debug;

use crate::{
    Error, Result,
    units::{TimeUnit, TimingTable, format_significant},
};

const LABEL_KEYS: &[&str] = &[
    "label",
    "graph",
    "dataset",
    "name",
    "ten",
    "ten_do_thi",
    "do_thi",
];

const DIJKSTRA_KEYS: &[&str] = &[
    "dijkstra",
    "dijkstra_us",
    "dijkstra_ms",
    "dijkstra_s",
    "dijkstra_ns",
    "dijkstra_time",
    "dijkstra_time_us",
    "dijkstra_time_ms",
    "dijkstra_time_s",
    "dijkstra_time_ns",
];

const BELLMAN_KEYS: &[&str] = &[
    "bellman",
    "bellman_us",
    "bellman_ms",
    "bellman_s",
    "bellman_ns",
    "bellman_ford",
    "bellman_ford_us",
    "bellman_ford_ms",
    "bellman_ford_s",
    "bellman_ford_ns",
    "bellman_time",
    "bellman_time_us",
    "bellman_time_ms",
    "bellman_time_s",
    "bellman_time_ns",
    "bellmanford",
    "bellmanford_us",
    "bellmanford_ms",
    "bellmanford_s",
    "bellmanford_ns",
];

/// Column positions found in a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnIndices {
    pub label: Option<usize>,
    pub non_negative: Option<usize>,
    pub tolerant: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLayout {
    /// The first row names at least one known column.
    Header(ColumnIndices),
    /// No header, columns are `label, dijkstra, bellman-ford`.
    Positional,
}

/// Lower case, spaces and dashes to `_`, everything outside `[a-z0-9_]`
/// removed.
pub fn normalize_key(cell: &str) -> String {
    cell.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}

/// Decides whether `row` is a header and where its columns are.
pub fn classify_header<S: AsRef<str>>(row: &[S]) -> HeaderLayout {
    let keys: Vec<String> = row.iter().map(|c| normalize_key(c.as_ref())).collect();
    let find = |names: &[&str]| keys.iter().position(|k| names.contains(&k.as_str()));

    let columns = ColumnIndices {
        label: find(LABEL_KEYS),
        non_negative: find(DIJKSTRA_KEYS),
        tolerant: find(BELLMAN_KEYS),
    };

    if columns == ColumnIndices::default() {
        HeaderLayout::Positional
    } else {
        HeaderLayout::Header(columns)
    }
}

/// Rows of a timing csv with the unit named by its header, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingCsv {
    pub labels: Vec<String>,
    pub non_negative: Vec<f64>,
    pub tolerant: Vec<f64>,
    pub inferred_unit: Option<TimeUnit>,
}

impl TimingCsv {
    pub fn into_table(self, unit: TimeUnit) -> TimingTable {
        TimingTable {
            labels: self.labels,
            non_negative: self.non_negative,
            tolerant: self.tolerant,
            unit,
        }
    }
}

pub fn read_timings(path: &Path) -> Result<TimingCsv> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    parse_timings(File::open(path)?)
}

pub fn parse_timings<R: std::io::Read>(reader: R) -> Result<TimingCsv> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows: Vec<StringRecord> = vec![];
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) || record.get(0).is_some_and(|c| c.starts_with('#')) {
            continue;
        }
        rows.push(record);
    }

    let Some(first) = rows.first() else {
        return Err(Error::Csv("file is empty".into()));
    };

    let (columns, inferred_unit, data) = match classify_header(&first.iter().collect::<Vec<_>>()) {
        HeaderLayout::Header(columns) => {
            let (Some(non_negative), Some(tolerant)) = (columns.non_negative, columns.tolerant)
            else {
                return Err(Error::Csv(
                    "header is missing the dijkstra or bellman-ford column".into(),
                ));
            };
            let unit = TimeUnit::infer(&first[non_negative]).or(TimeUnit::infer(&first[tolerant]));
            (
                (columns.label.unwrap_or(0), non_negative, tolerant),
                unit,
                &rows[1..],
            )
        }
        HeaderLayout::Positional => {
            if first.len() < 3 {
                return Err(Error::Csv(
                    "expected at least 3 columns: label, dijkstra, bellman-ford".into(),
                ));
            }
            ((0, 1, 2), None, &rows[..])
        }
    };

    debug!("timing csv columns {columns:?}, unit {inferred_unit:?}");

    let (label_idx, non_negative_idx, tolerant_idx) = columns;
    let width = label_idx.max(non_negative_idx).max(tolerant_idx);

    let mut csv = TimingCsv {
        labels: vec![],
        non_negative: vec![],
        tolerant: vec![],
        inferred_unit,
    };

    // Rows are numbered after comments and blank lines are dropped, the
    // header counting as row 1.
    let first_row = rows.len() - data.len() + 1;
    for (line, row) in (first_row..).zip(data) {
        if row.len() <= width {
            return Err(Error::Csv(format!("row {line} has too few columns")));
        }

        let label = match &row[label_idx] {
            "" => format!("Case {line}"),
            label => label.to_string(),
        };
        csv.labels.push(label);
        csv.non_negative
            .push(parse_number(&row[non_negative_idx], line, "dijkstra")?);
        csv.tolerant
            .push(parse_number(&row[tolerant_idx], line, "bellman-ford")?);
    }

    Ok(csv)
}

fn parse_number(cell: &str, line: usize, column: &str) -> Result<f64> {
    let cell = cell.replace(',', "");
    if cell.is_empty() {
        return Err(Error::Csv(format!("missing {column} value in row {line}")));
    }
    if cell.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }
    cell.parse()
        .map_err(|_| Error::Csv(format!("invalid {column} value '{cell}' in row {line}")))
}

/// Writes `label,dijkstra_<unit>,bellman_ford_<unit>` and one row per
/// entry, values with six significant digits.
pub fn write_timings(path: &Path, table: &TimingTable) -> Result<()> {
    let file = File::create(path).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = WriterBuilder::new().from_writer(file);

    writer.write_record([
        "label".to_string(),
        format!("dijkstra_{}", table.unit),
        format!("bellman_ford_{}", table.unit),
    ])?;
    for (label, non_negative, tolerant) in table.rows() {
        writer.write_record([
            label.to_string(),
            format_significant(non_negative, 6),
            format_significant(tolerant, 6),
        ])?;
    }
    writer.flush().map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<TimingCsv> {
        parse_timings(text.as_bytes())
    }

    #[test]
    fn classify() {
        assert_eq!(
            classify_header(&["label", "dijkstra_ms", "bellman_ms"]),
            HeaderLayout::Header(ColumnIndices {
                label: Some(0),
                non_negative: Some(1),
                tolerant: Some(2)
            })
        );
        assert_eq!(
            classify_header(&["Bellman-Ford (us)", "Graph", "Dijkstra"]),
            HeaderLayout::Header(ColumnIndices {
                label: Some(1),
                non_negative: Some(2),
                tolerant: Some(0)
            })
        );
        assert_eq!(
            classify_header(&["G1", "1.5", "3.2"]),
            HeaderLayout::Positional
        );
    }

    #[test]
    fn normalize() {
        assert_eq!(normalize_key("  Bellman-Ford Time (ms) "), "bellman_ford_time_ms");
        assert_eq!(normalize_key("Tên đồ thị"), "tn__th");
    }

    #[test]
    fn header_with_unit() {
        let csv = parse("label,dijkstra_ms,bellman_ms\nG1,1.5,3.2\n").unwrap();

        assert_eq!(csv.labels, vec!["G1"]);
        assert_eq!(csv.non_negative, vec![1.5]);
        assert_eq!(csv.tolerant, vec![3.2]);
        assert_eq!(csv.inferred_unit, Some(TimeUnit::Millis));
    }

    #[test]
    fn positional_rows() {
        let csv = parse("# measured by hand\nG1, 10, 20\n\n,\"1,200\",7\n").unwrap();

        assert_eq!(csv.labels, vec!["G1", "Case 2"]);
        assert_eq!(csv.non_negative, vec![10.0, 1200.0]);
        assert_eq!(csv.tolerant, vec![20.0, 7.0]);
        assert_eq!(csv.inferred_unit, None);
    }

    #[test]
    fn header_row_counts_as_row_one() {
        let csv = parse("# header follows\nname,dijkstra_ns,bellman_ns\n\nG1,1,2\n,3,4\n").unwrap();

        assert_eq!(csv.labels, vec!["G1", "Case 3"]);
        assert_eq!(csv.inferred_unit, Some(TimeUnit::Nanos));
    }

    #[test]
    fn header_without_label_uses_first_column() {
        let csv = parse("bellman_ford,dijkstra\n5,4\n").unwrap();

        assert_eq!(csv.labels, vec!["5"]);
        assert_eq!(csv.non_negative, vec![4.0]);
        assert_eq!(csv.tolerant, vec![5.0]);
    }

    #[test]
    fn nan_values() {
        let csv = parse("label,dijkstra_s,bellman_ford_s\nneg,nan,0.5\n").unwrap();

        assert!(csv.non_negative[0].is_nan());
        assert_eq!(csv.inferred_unit, Some(TimeUnit::Seconds));
    }

    #[test]
    fn malformed_rows_are_errors() {
        assert!(matches!(parse(""), Err(Error::Csv(_))));
        assert!(matches!(parse("# only a comment\n"), Err(Error::Csv(_))));
        assert!(matches!(parse("label,dijkstra\nG1,2\n"), Err(Error::Csv(_))));
        assert!(matches!(parse("G1,2\n"), Err(Error::Csv(_))));
        assert!(matches!(parse("G1,2,3\nG2,4\n"), Err(Error::Csv(_))));
        assert!(matches!(parse("G1,2,3\nG2,fast,4\n"), Err(Error::Csv(_))));
        assert!(matches!(parse("G1,2,\n"), Err(Error::Csv(_))));
    }

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timings.csv");

        let mut table = TimingTable::new(TimeUnit::Micros);
        table.push("G1", 12.3456789, 1234567.891);
        table.push("G2", f64::NAN, 0.5);
        write_timings(&path, &table).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "label,dijkstra_us,bellman_ford_us\nG1,12.3457,1.23457e+06\nG2,nan,0.5\n"
        );

        let csv = read_timings(&path).unwrap();
        assert_eq!(csv.labels, vec!["G1", "G2"]);
        assert_eq!(csv.inferred_unit, Some(TimeUnit::Micros));
        assert_eq!(csv.non_negative[0], 12.3457);
        assert!(csv.non_negative[1].is_nan());
        assert_eq!(csv.tolerant, vec![1234570.0, 0.5]);
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_timings(Path::new("no/such/timings.csv")),
            Err(Error::NotFound(_))
        ));
    }
}
