use regex::Regex;

/// Marker opening every candidate record line
const RECORD_MARKER: &str = "{\"id\"";

/// One input event: a coordinate pair and a text body
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Classification of one raw input line
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A well-formed record
    Record(Record),
    /// The line does not start with the record marker; not an error
    NotARecord,
    /// A candidate line with absent or unparsable fields; skipped
    Malformed,
}

/// Extracts the coordinate pair and text field from raw record lines.
///
/// The two substructures are located by pattern on the raw line rather
/// than through a full JSON parse, matching the flat one-record-per-line
/// input layout. Compiled once; pass by reference into workers.
pub struct RecordParser {
    coordinates: Regex,
    text: Regex,
}

impl RecordParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            coordinates: Regex::new(r#""coordinates":\[(.*?)\]"#)
                .expect("coordinate pattern is valid"),
            text: Regex::new(r#""text":"(.*?)","loc"#).expect("text pattern is valid"),
        }
    }

    /// Classify one line, yielding a [`Record`] only for well-formed
    /// candidates. Neither failure outcome aborts a scan.
    pub fn parse(&self, line: &str) -> Outcome {
        let line = line.trim();
        if !line.starts_with(RECORD_MARKER) {
            return Outcome::NotARecord;
        }

        let Some(coordinates) = self.coordinates.captures(line).and_then(|c| c.get(1)) else {
            return Outcome::Malformed;
        };
        let Some(text) = self.text.captures(line).and_then(|c| c.get(1)) else {
            return Outcome::Malformed;
        };

        let mut components = coordinates.as_str().split(',');
        let (Some(x), Some(y), None) = (components.next(), components.next(), components.next())
        else {
            return Outcome::Malformed;
        };
        let (Ok(x), Ok(y)) = (x.trim().parse::<f64>(), y.trim().parse::<f64>()) else {
            return Outcome::Malformed;
        };

        Outcome::Record(Record {
            x,
            y,
            text: text.as_str().to_string(),
        })
    }
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new()
    }
}
