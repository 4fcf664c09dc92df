use crate::Error;
use serde::Deserialize;
use serde::Serialize;

/// Numeric tokens from one evaluator output line, in order of appearance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Vec<String>);

impl Row {
    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    /// Splits on the first `has` and keeps every maximal run of digits
    /// and decimal points after it.
    ///
    /// `"AcAs has 85.00 10.00 87.50 ..."` -> `["85.00", "10.00", "87.50"]`
    pub fn scan(line: &str) -> Result<Self, Error> {
        let (_, tail) = line
            .split_once("has")
            .ok_or_else(|| Error::MalformedEvaluatorOutput(line.to_string()))?;
        Ok(Self(
            tail.split(|c: char| !(c.is_ascii_digit() || c == '.'))
                .filter(|token| !token.is_empty())
                .map(String::from)
                .collect(),
        ))
    }
}

impl From<Vec<String>> for Row {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}

/// One row per hand; blank lines are skipped, any other line without
/// `has` fails the whole output.
pub fn scan(output: &str) -> Result<Vec<Row>, Error> {
    let rows = output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Row::scan)
        .collect::<Result<Vec<Row>, Error>>()?;
    match rows.is_empty() {
        true => Err(Error::MalformedEvaluatorOutput("empty output".into())),
        false => Ok(rows),
    }
}

/// Typed view of a Row: `(wins, ties, equity, equity2)`.
///
/// Serializes as the original tokens, so a stored result reads back
/// bit-identical to what was first parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Row", into = "Row")]
pub struct Stats {
    pub wins: f64,
    pub ties: f64,
    pub equity: f64,
    pub equity2: f64,
    row: Row,
}

impl Stats {
    pub fn row(&self) -> &Row {
        &self.row
    }
    /// equity as a fraction in [0, 1]
    pub fn fraction(&self) -> f64 {
        self.equity / 100.
    }
    fn malformed(row: &Row) -> Error {
        Error::MalformedEvaluatorOutput(format!("{:?}", row.tokens()))
    }
}

impl TryFrom<Row> for Stats {
    type Error = Error;
    fn try_from(row: Row) -> Result<Self, Self::Error> {
        let values = row
            .tokens()
            .iter()
            .take(4)
            .map(|token| token.parse::<f64>())
            .collect::<Result<Vec<f64>, _>>()
            .map_err(|_| Self::malformed(&row))?;
        if values.len() < 4
            || values.iter().any(|v| !v.is_finite() || *v < 0.)
            || values[2] > 100.
        {
            return Err(Self::malformed(&row));
        }
        Ok(Self {
            wins: values[0],
            ties: values[1],
            equity: values[2],
            equity2: values[3],
            row,
        })
    }
}
impl From<Stats> for Row {
    fn from(stats: Stats) -> Self {
        stats.row
    }
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "wins {:>8} ties {:>8} equity {:>8} ({})",
            self.wins,
            self.ties,
            self.equity,
            self.equity2
        )
    }
}
