use crate::cfgtypes::ParamType;
use crate::convert::is_c_space;
use crate::error::SchemaError;

/// Upper bound on the number of parameters a schema may declare.
pub const MAX_NUM_PARAM: usize = 250;
/// Size of a name buffer, terminator included; names hold at most one byte less.
pub const PARAM_NAME_LENGTH: usize = 64;

/// One expected parameter: its name and declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    name: String,
    param_type: ParamType,
}

impl SchemaEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param_type(&self) -> ParamType {
        self.param_type
    }
}

/// The ordered table of parameters a parse looks for.
/// Names are unique and the table is non-empty; both are checked once, here,
/// so the parser and the lookups never have to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    entries: Vec<SchemaEntry>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn new<I, S>(params: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (S, ParamType)>,
        S: Into<String>,
    {
        params
            .into_iter()
            .fold(Self::builder(), |builder, (name, ty)| builder.param(name, ty))
            .build()
    }

    /// Index of `name` in table order. Exact, case-sensitive match.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name == name)
    }

    pub fn entry(&self, index: usize) -> Option<&SchemaEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a built schema.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects `(name, type)` pairs and validates them all in [`SchemaBuilder::build`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    entries: Vec<SchemaEntry>,
}

impl SchemaBuilder {
    pub fn param<S: Into<String>>(mut self, name: S, param_type: ParamType) -> Self {
        self.entries.push(SchemaEntry {
            name: name.into(),
            param_type,
        });
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        if self.entries.is_empty() {
            return Err(SchemaError::Empty);
        }
        if self.entries.len() > MAX_NUM_PARAM {
            return Err(SchemaError::TooManyParams {
                limit: MAX_NUM_PARAM,
            });
        }
        for (i, entry) in self.entries.iter().enumerate() {
            validate_name(&entry.name)?;
            if self.entries[..i].iter().any(|prev| prev.name == entry.name) {
                return Err(SchemaError::DuplicateName(entry.name.clone()));
            }
        }
        Ok(Schema {
            entries: self.entries,
        })
    }
}

fn validate_name(name: &str) -> Result<(), SchemaError> {
    // The tokenizer splits on whitespace and treats a leading '#' as a comment,
    // so such a name could never be matched.
    if name.is_empty() || name.starts_with('#') || name.chars().any(is_c_space) {
        return Err(SchemaError::InvalidName(name.to_string()));
    }
    if name.len() >= PARAM_NAME_LENGTH {
        return Err(SchemaError::NameTooLong {
            name: name.to_string(),
            limit: PARAM_NAME_LENGTH - 1,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_table_order() {
        let schema = Schema::new([
            ("userExposure", ParamType::Integer),
            ("userTempAdjust", ParamType::Integer),
            ("outputFilename", ParamType::String),
        ])
        .unwrap();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.position("userExposure"), Some(0));
        assert_eq!(schema.position("outputFilename"), Some(2));
        assert_eq!(schema.entry(2).unwrap().param_type(), ParamType::String);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let schema = Schema::new([("userExposure", ParamType::Integer)]).unwrap();
        assert_eq!(schema.position("userexposure"), None);
        assert_eq!(schema.position("userExposure "), None);
    }

    #[test]
    fn rejects_duplicates() {
        let err = Schema::builder()
            .param("gain", ParamType::Float)
            .param("gain", ParamType::Double)
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateName("gain".to_string()));
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(Schema::builder().build().unwrap_err(), SchemaError::Empty);
    }

    #[test]
    fn rejects_too_many() {
        let names: Vec<String> = (0..=MAX_NUM_PARAM).map(|i| format!("p{i}")).collect();
        let err = Schema::new(names.into_iter().map(|n| (n, ParamType::Integer))).unwrap_err();
        assert_eq!(err, SchemaError::TooManyParams { limit: MAX_NUM_PARAM });

        let names = (0..MAX_NUM_PARAM).map(|i| (format!("p{i}"), ParamType::Integer));
        assert_eq!(Schema::new(names).unwrap().len(), MAX_NUM_PARAM);
    }

    #[test]
    fn rejects_unmatchable_names() {
        for bad in ["", "#gain", "two words", "tab\tbed", "form\x0cfeed"] {
            assert_eq!(
                Schema::new([(bad, ParamType::Integer)]).unwrap_err(),
                SchemaError::InvalidName(bad.to_string())
            );
        }
        let long = "x".repeat(PARAM_NAME_LENGTH);
        assert_eq!(
            Schema::new([(long.as_str(), ParamType::Integer)]).unwrap_err(),
            SchemaError::NameTooLong {
                name: long.clone(),
                limit: PARAM_NAME_LENGTH - 1,
            }
        );
        assert!(Schema::new([("gain\u{a0}db", ParamType::Integer)]).is_ok());
        let max = "x".repeat(PARAM_NAME_LENGTH - 1);
        assert!(Schema::new([(max.as_str(), ParamType::Integer)]).is_ok());
    }
}
