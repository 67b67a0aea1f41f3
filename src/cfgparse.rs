
// Imports
use std::fs::File;
use std::io::{self, prelude::*, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::convert::{convert, is_c_space};
use crate::error::ParseError;
use crate::options::{ParseOptions, ReadErrorPolicy};
use crate::parsedcfg::ParsedConfig;
use crate::schema::Schema;
use crate::store::ValueStore;

const COMMENT_TOKEN: char = '#';

// Implementation

/// The parser engine.
/// Owns the open input and the value store it fills; both are released when
/// [`ConfigParser::parse`] consumes it, whichever way the parse ends.
#[derive(Debug)]
pub struct ConfigParser<'s, R> {
    schema: &'s Schema,
    options: ParseOptions,
    store: ValueStore,
    context: ParseContext<R>,
}

impl<'s> ConfigParser<'s, BufReader<File>> {
    /// Opens `file_path` for reading. Nothing is parsed yet.
    pub fn open<P: AsRef<Path>>(
        file_path: P,
        schema: &'s Schema,
        options: ParseOptions,
    ) -> Result<Self, ParseError> {
        let path = file_path.as_ref();
        let context = ParseContext::create(path)?;
        debug!(path = %path.display(), params = schema.len(), "opened config file");
        Ok(Self::with_context(context, schema, options))
    }
}

impl<'s, R: BufRead> ConfigParser<'s, R> {
    /// Parses from any buffered reader instead of a file.
    pub fn from_reader(reader: R, schema: &'s Schema, options: ParseOptions) -> Self {
        Self::with_context(ParseContext::new(reader, None), schema, options)
    }

    fn with_context(context: ParseContext<R>, schema: &'s Schema, options: ParseOptions) -> Self {
        Self {
            schema,
            options,
            store: ValueStore::for_schema(schema),
            context,
        }
    }

    /////////////////
    // Parsing Funcs
    /////////////////

    /// Reads every remaining line and hands back the filled store.
    pub fn parse(mut self) -> Result<ParsedConfig, ParseError> {
        loop {
            match self.context.fill_buffer() {
                Ok(true) => self.process_line()?,
                Ok(false) => break,
                Err(err) => match self.options.read_errors {
                    ReadErrorPolicy::Fail => {
                        return Err(ParseError::Read {
                            line: self.context.line_num,
                            source: err,
                        })
                    }
                    ReadErrorPolicy::TreatAsEof => {
                        warn!(
                            source = %self.context.describe(),
                            line = self.context.line_num,
                            error = %err,
                            "read error, keeping the lines parsed so far"
                        );
                        break;
                    }
                },
            }
        }

        let parsed = ParsedConfig::new(self.schema.clone(), self.store);
        debug!(
            source = %self.context.describe(),
            lines = self.context.line_num,
            available = parsed.available_count(),
            params = parsed.schema().len(),
            "config parsed"
        );
        Ok(parsed)
    }

    /// Tokenizes the current line and, if it names a schema parameter, decodes its value.
    fn process_line(&mut self) -> Result<(), ParseError> {
        let line_num = self.context.line_num;
        let Some(raw) = RawLine::tokenize(self.context.view_line()) else {
            return Ok(());
        };

        let Some(index) = self.schema.position(raw.name) else {
            debug!(line = line_num, name = raw.name, "ignoring unknown parameter");
            return Ok(());
        };
        // `position` only returns indices of existing entries.
        let entry = &self.schema.entries()[index];

        let value = convert(raw.value, entry.param_type(), &self.options).ok_or_else(|| {
            ParseError::Conversion {
                line: line_num,
                name: raw.name.to_string(),
                value: raw.value.to_string(),
                expected: entry.param_type(),
            }
        })?;
        trace!(line = line_num, name = raw.name, %value, "parsed parameter");

        if self.store.set(index, value) {
            warn!(line = line_num, name = raw.name, "parameter set again, later value wins");
        }
        Ok(())
    }
}

/// A line split into its first two whitespace-separated tokens.
/// Only C-locale whitespace separates; bytes like 0xA0 stay inside a token.
/// Anything after the value token is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawLine<'a> {
    name: &'a str,
    /// Empty when the line holds only a name.
    value: &'a str,
}

impl<'a> RawLine<'a> {
    /// `None` for blank lines and comments (first token starts with `#`).
    pub(crate) fn tokenize(line: &'a str) -> Option<Self> {
        let mut tokens = line.split(is_c_space).filter(|token| !token.is_empty());
        let name = tokens.next()?;
        if name.starts_with(COMMENT_TOKEN) {
            return None;
        }
        Some(Self {
            name,
            value: tokens.next().unwrap_or(""),
        })
    }
}

/// The input side of a parse: the reader, the current line and where we are.
#[derive(Debug)]
struct ParseContext<R> {
    line_num: usize,
    curr_line: String,
    raw_line: Vec<u8>,
    path: Option<PathBuf>,
    reader: R,
}

impl ParseContext<BufReader<File>> {
    fn create(file_path: &Path) -> Result<Self, ParseError> {
        let file = File::open(file_path).map_err(|source| ParseError::Open {
            path: file_path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file), Some(file_path.to_path_buf())))
    }
}

impl<R: BufRead> ParseContext<R> {
    fn new(reader: R, path: Option<PathBuf>) -> Self {
        Self {
            line_num: 0,
            curr_line: String::with_capacity(1024),
            raw_line: Vec::with_capacity(1024),
            path,
            reader,
        }
    }

    /// Fills the current line buffer.
    /// EOF: Ok(false)
    ///
    /// Lines that aren't valid UTF-8 are read one byte per character, so they
    /// never fail the read.
    fn fill_buffer(&mut self) -> io::Result<bool> {
        self.curr_line.clear();
        self.raw_line.clear();
        self.line_num += 1;
        if self.reader.read_until(b'\n', &mut self.raw_line)? == 0 {
            self.line_num -= 1;
            return Ok(false);
        }
        match std::str::from_utf8(&self.raw_line) {
            Ok(line) => self.curr_line.push_str(line),
            Err(_) => self.curr_line.extend(self.raw_line.iter().map(|&b| char::from(b))),
        }
        Ok(true)
    }

    fn view_line(&self) -> &str {
        self.curr_line.as_str()
    }

    fn describe(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => String::from("<reader>"),
        }
    }
}
