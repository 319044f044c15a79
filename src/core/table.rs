use std::collections::HashMap;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::core::types::ResultRow;

/// Column headers of the exported table, in order
pub const TABLE_COLUMNS: [&str; 6] = [
    "Sequence ID",
    "Motif",
    "Start",
    "End",
    "Matched Sequence",
    "Length",
];

/// Occurrence count for one motif
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotifCount {
    pub motif: String,
    pub count: usize,
}

/// Ordered collection of result rows.
///
/// Rows keep insertion order: sequence order, then motif catalog order, then
/// match occurrence order. Rows are never modified once added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_rows(rows: Vec<ResultRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<ResultRow> {
        self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether any matched-sequence data is present
    #[must_use]
    pub fn has_matches(&self) -> bool {
        self.rows.iter().any(|r| !r.matched_sequence.is_empty())
    }

    /// Append all rows of another table after this one's
    pub fn append(&mut self, mut other: ResultTable) {
        self.rows.append(&mut other.rows);
    }

    /// Distinct sequence IDs in first-seen order
    #[must_use]
    pub fn sequence_ids(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.sequence_id.as_str()) {
                seen.push(row.sequence_id.as_str());
            }
        }
        seen
    }

    /// Occurrences per motif, most frequent first.
    ///
    /// Ties keep the order in which motifs first appear in the table.
    #[must_use]
    pub fn motif_counts(&self) -> Vec<MotifCount> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<MotifCount> = Vec::new();

        for row in &self.rows {
            if let Some(&i) = index.get(row.motif.as_str()) {
                counts[i].count += 1;
            } else {
                index.insert(row.motif.as_str(), counts.len());
                counts.push(MotifCount {
                    motif: row.motif.clone(),
                    count: 1,
                });
            }
        }

        // Stable sort preserves first-seen order among equal counts
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts
    }

    /// Write the table as delimited text with a header row and no index column
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the underlying writer fails.
    pub fn write_delimited<W: Write>(&self, writer: W, delimiter: u8) -> csv::Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(writer);

        wtr.write_record(TABLE_COLUMNS)?;
        for row in &self.rows {
            let start = row.start.to_string();
            let end = row.end.to_string();
            let length = row.length.to_string();
            wtr.write_record([
                row.sequence_id.as_str(),
                row.motif.as_str(),
                start.as_str(),
                end.as_str(),
                row.matched_sequence.as_str(),
                length.as_str(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write the table as CSV
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the underlying writer fails.
    pub fn write_csv<W: Write>(&self, writer: W) -> csv::Result<()> {
        self.write_delimited(writer, b',')
    }

    /// Render the table as a CSV string
    ///
    /// # Errors
    ///
    /// Returns an error if CSV serialization fails.
    pub fn to_csv_string(&self) -> csv::Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl FromIterator<ResultRow> for ResultTable {
    fn from_iter<I: IntoIterator<Item = ResultRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
