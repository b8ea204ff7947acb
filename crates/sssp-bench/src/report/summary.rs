use std::{
    fmt::Write as _,
    fs::File,
    io::{BufWriter, Write as _},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    harness::TimingRecord,
    units::{TimeUnit, format_value},
};

/// Measured and estimated cost of both engines on one graph. Times are in
/// `unit` of the surrounding [`Report`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub label: String,
    pub vertices: Option<usize>,
    pub edges: Option<usize>,
    pub non_negative: f64,
    pub tolerant: f64,
    /// How many times slower Bellman-Ford was. NaN if Dijkstra was skipped
    /// or too fast to measure.
    pub ratio: f64,
    /// `E ln V`
    pub dijkstra_ops: Option<f64>,
    /// `V E`
    pub bellman_ops: Option<usize>,
}

impl Comparison {
    pub fn from_record(record: &TimingRecord, unit: TimeUnit) -> Self {
        let factor = unit.factor();
        let ratio = if record.non_negative > 0.0 && record.tolerant > 0.0 {
            record.tolerant / record.non_negative
        } else {
            f64::NAN
        };

        let (dijkstra_ops, bellman_ops) = match (record.vertices, record.edges) {
            (Some(v), Some(e)) => (
                Some(e as f64 * (v as f64).ln()),
                Some(v.saturating_mul(e)),
            ),
            _ => (None, None),
        };

        Self {
            label: record.label.clone(),
            vertices: record.vertices,
            edges: record.edges,
            non_negative: record.non_negative * factor,
            tolerant: record.tolerant * factor,
            ratio,
            dijkstra_ops,
            bellman_ops,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub unit: TimeUnit,
    pub repetitions: u32,
    pub comparisons: Vec<Comparison>,
}

impl Report {
    pub fn new(records: &[TimingRecord], unit: TimeUnit, repetitions: u32) -> Self {
        Self {
            unit,
            repetitions,
            comparisons: records
                .iter()
                .map(|r| Comparison::from_record(r, unit))
                .collect(),
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Fixed width table, one row per graph.
    pub fn table(&self) -> String {
        let unit = self.unit.as_str();
        let mut out = String::new();

        let _ = writeln!(
            out,
            "{:<12} {:>8} {:>8} {:>14} {:>14} {:>8} {:>12} {:>12}",
            "graph",
            "V",
            "E",
            format!("dijkstra {unit}"),
            format!("bellman {unit}"),
            "ratio",
            "E ln V",
            "V E"
        );

        for c in &self.comparisons {
            let count = |n: Option<usize>| n.map_or("-".to_string(), |n| n.to_string());
            let non_negative = if c.non_negative.is_nan() {
                "skipped".to_string()
            } else {
                format_value(c.non_negative)
            };
            let ratio = if c.ratio.is_nan() {
                "-".to_string()
            } else {
                format!("{:.2}x", c.ratio)
            };

            let _ = writeln!(
                out,
                "{:<12} {:>8} {:>8} {:>14} {:>14} {:>8} {:>12} {:>12}",
                c.label,
                count(c.vertices),
                count(c.edges),
                non_negative,
                format_value(c.tolerant),
                ratio,
                c.dijkstra_ops.map_or("-".to_string(), |ops| format!("{ops:.0}")),
                count(c.bellman_ops),
            );
        }

        out
    }
}
