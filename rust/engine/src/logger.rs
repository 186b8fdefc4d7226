use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::resolver::Outcome;
use crate::table::RoundReport;

/// One settled hand inside a [`RoundRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandEntry {
    pub cards: Vec<Card>,
    pub wager: u32,
    pub outcome: Outcome,
    #[serde(default)]
    pub doubled: bool,
    #[serde(default)]
    pub split: bool,
}

/// Complete record of one round, serialized as one JSONL line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Unique identifier for this round (format: YYYYMMDD-NNNNNN)
    pub round_id: String,
    /// Seed of the shoe the round was dealt from
    pub seed: Option<u64>,
    pub bet: u32,
    pub hands: Vec<HandEntry>,
    pub dealer: Vec<Card>,
    pub net: f64,
    pub running_count: i32,
    pub true_count: i32,
    /// Timestamp when the round was played (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    /// Additional metadata (heat level, bankroll, ...)
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

impl RoundRecord {
    pub fn from_report(round_id: String, seed: Option<u64>, bet: u32, report: &RoundReport) -> Self {
        let hands = report
            .hands
            .iter()
            .zip(&report.settlement.outcomes)
            .map(|(hand, outcome)| HandEntry {
                cards: hand.cards().to_vec(),
                wager: hand.wager(),
                outcome: outcome.outcome,
                doubled: hand.is_doubled(),
                split: hand.is_split_origin(),
            })
            .collect();
        Self {
            round_id,
            seed,
            bet,
            hands,
            dealer: report.dealer.clone(),
            net: report.settlement.net,
            running_count: report.running_count,
            true_count: report.true_count,
            ts: None,
            meta: None,
        }
    }
}

/// Result of one counting drill session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Fraction of count checks answered correctly, 0.0..=1.0
    pub accuracy: f64,
    pub cards_completed: u32,
    pub time_in_seconds: u64,
    /// RFC3339, filled in by [`RoundLogger::write_summary`] when empty
    #[serde(default)]
    pub timestamp: String,
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Append-only JSONL writer for round and session histories.
pub struct RoundLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl RoundLogger {
    /// Starts a fresh history at `path`, truncating any existing file.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        Self::open(path.as_ref(), false)
    }

    /// Opens `path` for appending, keeping the history already there.
    pub fn append<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        Self::open(path.as_ref(), true)
    }

    fn open(path: &Path, append: bool) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// Logger that writes nothing and numbers ids under a fixed date.
    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_round_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(now_rfc3339());
        }
        self.write_line(&rec)
    }

    pub fn write_summary(&mut self, summary: &SessionSummary) -> std::io::Result<()> {
        let mut s = summary.clone();
        if s.timestamp.is_empty() {
            s.timestamp = now_rfc3339();
        }
        self.write_line(&s)
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> std::io::Result<()> {
        let line = serde_json::to_string(value).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_zero_padded() {
        assert_eq!(format_round_id("20260101", 7), "20260101-000007");
    }

    #[test]
    fn test_logger_numbers_sequentially() {
        let mut logger = RoundLogger::with_seq_for_test("20261231");
        assert_eq!(logger.next_id(), "20261231-000001");
        assert_eq!(logger.next_id(), "20261231-000002");
    }

    #[test]
    fn summary_round_trips_without_timestamp() {
        let json = r#"{"accuracy":0.8,"cards_completed":52,"time_in_seconds":61}"#;
        let s: SessionSummary = serde_json::from_str(json).unwrap();
        assert_eq!(s.cards_completed, 52);
        assert!(s.timestamp.is_empty());
    }
}
