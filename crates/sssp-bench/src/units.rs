use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, harness::TimingRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    Seconds,
    Millis,
    Micros,
    Nanos,
}

impl TimeUnit {
    /// Multiplier converting seconds into this unit.
    pub fn factor(&self) -> f64 {
        match self {
            Self::Seconds => 1.0,
            Self::Millis => 1e3,
            Self::Micros => 1e6,
            Self::Nanos => 1e9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seconds => "s",
            Self::Millis => "ms",
            Self::Micros => "us",
            Self::Nanos => "ns",
        }
    }

    /// Guesses the unit from a csv header cell such as `dijkstra_ms`.
    pub fn infer(header: &str) -> Option<Self> {
        let header = header.to_lowercase();

        if header.contains("ms") {
            Some(Self::Millis)
        } else if header.contains("us") || header.contains('\u{3bc}') || header.contains('\u{b5}') {
            Some(Self::Micros)
        } else if header.contains("ns") {
            Some(Self::Nanos)
        } else if header.contains(" s") || header.ends_with('s') {
            Some(Self::Seconds)
        } else {
            None
        }
    }
}

impl Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s" | "sec" | "secs" | "seconds" => Ok(Self::Seconds),
            "ms" => Ok(Self::Millis),
            "us" | "\u{3bc}s" | "\u{b5}s" => Ok(Self::Micros),
            "ns" => Ok(Self::Nanos),
            _ => Err(Error::Unit(s.to_string())),
        }
    }
}

/// Where the timings come from. Decides the unit when nothing else does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Measured live, values are in seconds.
    Benchmark,
    /// Read from a csv of pre-measured timings.
    Csv,
}

impl Mode {
    pub fn default_unit(&self) -> TimeUnit {
        match self {
            Self::Benchmark => TimeUnit::Seconds,
            Self::Csv => TimeUnit::Micros,
        }
    }
}

/// Explicit override, then the unit inferred from the csv header, then
/// the mode default.
pub fn resolve_unit(overridden: Option<TimeUnit>, inferred: Option<TimeUnit>, mode: Mode) -> TimeUnit {
    overridden
        .or(inferred)
        .unwrap_or_else(|| mode.default_unit())
}

/// Labels with the two timing series, ready to be written or drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingTable {
    pub labels: Vec<String>,
    pub non_negative: Vec<f64>,
    pub tolerant: Vec<f64>,
    pub unit: TimeUnit,
}

impl TimingTable {
    pub fn new(unit: TimeUnit) -> Self {
        Self {
            labels: vec![],
            non_negative: vec![],
            tolerant: vec![],
            unit,
        }
    }

    pub fn push(&mut self, label: impl Into<String>, non_negative: f64, tolerant: f64) {
        self.labels.push(label.into());
        self.non_negative.push(non_negative);
        self.tolerant.push(tolerant);
    }

    /// Converts measured seconds into `unit`.
    pub fn from_records(records: &[TimingRecord], unit: TimeUnit) -> Self {
        let mut table = Self::new(unit);
        let factor = unit.factor();
        records.iter().for_each(|r| {
            table.push(r.label.clone(), r.non_negative * factor, r.tolerant * factor)
        });
        table
    }

    pub fn scale(&mut self, factor: f64) {
        if factor == 1.0 {
            return;
        }
        self.non_negative
            .iter_mut()
            .chain(self.tolerant.iter_mut())
            .for_each(|v| *v *= factor);
    }

    /// Replaces every label with `prefix` followed by its 1-based index.
    pub fn relabel(&mut self, prefix: &str) {
        self.labels
            .iter_mut()
            .enumerate()
            .for_each(|(i, label)| *label = format!("{prefix}{}", i + 1));
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, f64, f64)> + '_ {
        self.labels
            .iter()
            .zip(self.non_negative.iter().zip(self.tolerant.iter()))
            .map(|(label, (d, b))| (label.as_str(), *d, *b))
    }
}

/// Chart annotation: thousands grouped from 1000 on, then 1, 2 and 3
/// decimals below 1000, 100 and 1.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1000.0 {
        let digits = format!("{:.0}", magnitude);
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if value.is_sign_negative() {
            grouped.push('-');
        }
        digits.chars().enumerate().for_each(|(i, c)| {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        });
        grouped
    } else if magnitude >= 100.0 {
        format!("{value:.1}")
    } else if magnitude >= 1.0 {
        format!("{value:.2}")
    } else {
        format!("{value:.3}")
    }
}

/// `printf("%.{precision}g")`: `precision` significant digits, scientific
/// notation for very small or large magnitudes, trailing zeros removed.
pub fn format_significant(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let precision = precision.max(1);
    // Rounds to the requested digits, so the exponent already accounts for
    // carries like 9.999995 -> 1.00000e1.
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .expect("exponent formatting always contains 'e'");
    let exponent: i32 = exponent.parse().expect("exponent is an integer");

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
