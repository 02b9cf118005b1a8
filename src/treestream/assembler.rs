use super::StreamError;
use crate::parsers::fragment::scan_fragment;
use crate::parsers::nexus::{
    FileFormat, NexusResult, TranslateBuilder, TranslateTable, classify_format,
    is_translate_marker,
};
use log::{debug, warn};
use std::io::BufRead;

/// Everything extracted from one input source.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AssembledFile {
    pub format: FileFormat,
    pub translate_table: TranslateTable,
    /// Candidate tree descriptions in order of appearance.
    pub fragments: Vec<String>,
    pub line_count: usize,
}

/// Classification state for one source. Built fresh per source and
/// consumed by [FileContext::finish], so nothing carries over to the next.
#[derive(Debug, Default)]
struct FileContext {
    format: Option<FileFormat>,
    translate: TranslateBuilder,
    fragments: Vec<String>,
    line_count: usize,
}

impl FileContext {
    fn consume(&mut self, line: &str, line_number: usize) -> NexusResult<()> {
        self.line_count = line_number;

        if line.trim().is_empty() {
            return Ok(());
        }

        let format = *self.format.get_or_insert_with(|| classify_format(line));

        if format == FileFormat::Nexus {
            if self.translate.is_open() {
                return self.translate.feed(line, line_number);
            }
            if is_translate_marker(line) {
                self.translate.open();
                return Ok(());
            }
        }

        if let Some(fragment) = scan_fragment(line) {
            self.fragments.push(fragment.to_string());
        }

        Ok(())
    }

    fn finish(self) -> AssembledFile {
        if self.translate.is_open() {
            warn!(
                "Translate block not terminated before end of input; using {} entries read so far.",
                self.translate.table().len()
            );
        }

        AssembledFile {
            format: self.format.unwrap_or_default(),
            translate_table: self.translate.into_table(),
            fragments: self.fragments,
            line_count: self.line_count,
        }
    }
}

/// Reads `reader` to the end and collects its tree fragments.
///
/// The first non-blank line fixes the format. In NEXUS mode the lines of a
/// `translate` block (including the line that opens it) are never scanned
/// for fragments. A malformed translate entry aborts with an error.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD instead of
/// failing the read.
pub fn assemble<R: BufRead>(
    mut reader: R,
) -> Result<AssembledFile, StreamError> {
    let mut context = FileContext::default();
    let mut buf: Vec<u8> = Vec::new();
    let mut line_number: usize = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;
        let line = String::from_utf8_lossy(strip_line_ending(&buf));
        context.consume(&line, line_number)?;
    }

    let assembled = context.finish();
    debug!(
        "{} lines, format: {}, translate entries: {}, fragments: {}.",
        assembled.line_count,
        assembled.format,
        assembled.translate_table.len(),
        assembled.fragments.len()
    );
    Ok(assembled)
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
