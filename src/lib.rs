// Module Declarations
mod cfgparse; // The line-by-line parser engine
mod cfgtypes; // Rust representations of the declared parameter types
mod convert; // Value token -> typed value conversions
mod error;
mod options; // Knobs controlling conversion and read-error behavior
mod parsedcfg; // The completely-parsed, read-only configuration
mod schema; // Caller-supplied table of expected parameters
mod store; // Per-parameter value slots

// Imports
use std::path::Path;

pub use cfgparse::ConfigParser;
pub use cfgtypes::{FromParamValue, ParamType, ParamValue};
pub use error::{LookupError, ParseError, SchemaError};
pub use options::{ConversionMode, ParseOptions, ReadErrorPolicy};
pub use parsedcfg::ParsedConfig;
pub use schema::{Schema, SchemaBuilder, SchemaEntry, MAX_NUM_PARAM, PARAM_NAME_LENGTH};
pub use store::PARAM_VALUE_LENGTH;

/// The interface to the config parser.
/// Reads the file at `file` line by line and decodes every parameter named in `schema`.
/// Lines naming parameters the schema doesn't know about are skipped.
///
/// ```no_run
/// use cfgp::{parse, ParamType, Schema};
///
/// let schema = Schema::builder()
///     .param("userExposure", ParamType::Integer)
///     .param("outputFilename", ParamType::String)
///     .build()?;
/// let parsed = parse("camera.cfg", &schema)?;
/// let exposure: Option<i32> = parsed.get_as("userExposure")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse<P: AsRef<Path>>(file: P, schema: &Schema) -> Result<ParsedConfig, ParseError> {
    parse_with(file, schema, ParseOptions::default())
}

/// Same as [`parse`], with explicit [`ParseOptions`].
pub fn parse_with<P: AsRef<Path>>(
    file: P,
    schema: &Schema,
    options: ParseOptions,
) -> Result<ParsedConfig, ParseError> {
    let parser = ConfigParser::open(file, schema, options)?;
    parser.parse()
}

/// Parses config text already held in memory.
pub fn parse_str(text: &str, schema: &Schema) -> Result<ParsedConfig, ParseError> {
    ConfigParser::from_reader(text.as_bytes(), schema, ParseOptions::default()).parse()
}
