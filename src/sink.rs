//! Persistence sinks.
//!
//! The on-disk layout belongs to the consumer. [`JsonSink`] writes the layout
//! the typing-practice front end reads:
//!
//! ```json
//! [{ "kn": "ಮಗು", "tr": "magu", "en": "child",
//!    "segments": [{ "kn": "ಮ", "tr": "ma" }, { "kn": "ಗು", "tr": "gu" }] }]
//! ```

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::entry::WordEntry;
use crate::error::Result;

/// Receives finished entries
pub trait EntrySink {
    /// Accept one entry
    fn write_entry(&mut self, entry: &WordEntry) -> Result<()>;

    /// Flush whatever is buffered
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl EntrySink for Vec<WordEntry> {
    fn write_entry(&mut self, entry: &WordEntry) -> Result<()> {
        self.push(entry.clone());
        Ok(())
    }
}

/// One segment in the front-end layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSegment {
    pub kn: String,
    pub tr: String,
}

/// One entry in the front-end layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppEntry {
    pub kn: String,
    pub tr: String,
    pub en: String,
    pub segments: Vec<AppSegment>,
}

impl From<&WordEntry> for AppEntry {
    fn from(entry: &WordEntry) -> Self {
        AppEntry {
            kn: entry.source.clone(),
            tr: entry.romanized.clone(),
            en: entry.gloss.clone(),
            segments: entry
                .segments
                .iter()
                .map(|s| AppSegment {
                    kn: s.text.clone(),
                    tr: s.roman.clone(),
                })
                .collect(),
        }
    }
}

/// Writes entries as one pretty-printed JSON array on [`finish`](EntrySink::finish)
pub struct JsonSink<W: Write> {
    writer: W,
    entries: Vec<AppEntry>,
}

impl<W: Write> JsonSink<W> {
    /// Create a sink writing to `writer`
    pub fn new(writer: W) -> Self {
        JsonSink {
            writer,
            entries: Vec::new(),
        }
    }

    /// Number of buffered entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EntrySink for JsonSink<W> {
    fn write_entry(&mut self, entry: &WordEntry) -> Result<()> {
        self.entries.push(AppEntry::from(entry));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.entries)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        tracing::debug!(entries = self.entries.len(), "wrote dictionary");
        Ok(())
    }
}

/// Send every entry to a sink, then finish it
pub fn write_entries(sink: &mut dyn EntrySink, entries: &[WordEntry]) -> Result<()> {
    for entry in entries {
        sink.write_entry(entry)?;
    }
    sink.finish()
}

/// Read a dictionary in the front-end layout
pub fn read_app_dictionary<R: Read>(reader: R) -> Result<Vec<AppEntry>> {
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::DictionaryEntryBuilder;

    #[test]
    fn test_json_layout() {
        let builder = DictionaryEntryBuilder::new();
        let entry = builder.build("ಮಗು", "child").unwrap();

        let mut sink = JsonSink::new(Vec::new());
        write_entries(&mut sink, &[entry]).unwrap();
        let bytes = sink.into_inner();

        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value[0]["kn"], "ಮಗು");
        assert_eq!(value[0]["tr"], "magu");
        assert_eq!(value[0]["en"], "child");
        assert_eq!(value[0]["segments"][1]["kn"], "ಗು");
        assert_eq!(value[0]["segments"][1]["tr"], "gu");
    }

    #[test]
    fn test_read_back() {
        let builder = DictionaryEntryBuilder::new();
        let entries = vec![
            builder.build("ಕನ್ನಡ", "Kannada").unwrap(),
            builder.build("ಜಗತ್ತು", "world").unwrap(),
        ];

        let mut sink = JsonSink::new(Vec::new());
        write_entries(&mut sink, &entries).unwrap();
        assert_eq!(sink.len(), 2);

        let parsed = read_app_dictionary(sink.into_inner().as_slice()).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1], AppEntry::from(&entries[1]));
        assert_eq!(parsed[1].segments.last().unwrap().tr, "ttu");
    }

    #[test]
    fn test_vec_sink() {
        let builder = DictionaryEntryBuilder::new();
        let entry = builder.build("ಕಲೆ", "art").unwrap();
        let mut sink: Vec<WordEntry> = Vec::new();
        write_entries(&mut sink, &[entry.clone()]).unwrap();
        assert_eq!(sink, vec![entry]);
    }

    #[test]
    fn test_empty_sink_writes_empty_array() {
        let mut sink = JsonSink::new(Vec::new());
        sink.finish().unwrap();
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap().trim(), "[]");
    }
}
