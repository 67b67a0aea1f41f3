use crate::cfgtypes::{FromParamValue, ParamType, ParamValue};
use crate::error::LookupError;
use crate::schema::Schema;
use crate::store::{ValueSlot, ValueStore};

/// The Rust representation of a completely-parsed, read-only config.
/// Lookups go through the schema it was parsed against and hand out copies.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedConfig {
    schema: Schema,
    store: ValueStore,
}

impl ParsedConfig {
    pub(crate) fn new(schema: Schema, store: ValueStore) -> Self {
        Self { schema, store }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    fn slot(&self, name: &str) -> Result<&ValueSlot, LookupError> {
        self.schema
            .position(name)
            .and_then(|index| self.store.slot(index))
            .ok_or_else(|| LookupError::UnknownParameter(name.to_string()))
    }

    /// A copy of the value of `name`, or `None` if no line set it.
    pub fn get(&self, name: &str) -> Result<Option<ParamValue>, LookupError> {
        Ok(self.slot(name)?.value().cloned())
    }

    /// Like [`ParsedConfig::get`], typed.
    /// Asking for a type other than the declared one is an error even when the
    /// parameter is unavailable.
    pub fn get_as<T: FromParamValue>(&self, name: &str) -> Result<Option<T>, LookupError> {
        let slot = self.slot(name)?;
        if slot.param_type() != T::PARAM_TYPE {
            return Err(LookupError::TypeMismatch {
                name: name.to_string(),
                declared: slot.param_type(),
                requested: T::PARAM_TYPE,
            });
        }
        Ok(slot.value().cloned().and_then(T::from_param_value))
    }

    /// Writes the value of `name` into `dest` if it is available, leaving `dest`
    /// untouched otherwise. Returns whether `dest` was written.
    ///
    /// Handy for filling a struct whose fields already hold defaults:
    /// ```
    /// use cfgp::{parse_str, ParamType, Schema};
    /// let schema = Schema::new([
    ///     ("userExposure", ParamType::Integer),
    ///     ("userTempAdjust", ParamType::Integer),
    /// ])?;
    /// let parsed = parse_str("userExposure -600\n", &schema)?;
    /// let (mut exposure, mut temp_adjust): (i32, i32) = (0, 50);
    /// assert!(parsed.read_into("userExposure", &mut exposure)?);
    /// assert!(!parsed.read_into("userTempAdjust", &mut temp_adjust)?);
    /// assert_eq!((exposure, temp_adjust), (-600, 50));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_into<T: FromParamValue>(&self, name: &str, dest: &mut T) -> Result<bool, LookupError> {
        match self.get_as::<T>(name)? {
            Some(value) => {
                *dest = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn is_available(&self, name: &str) -> Result<bool, LookupError> {
        Ok(self.slot(name)?.is_available())
    }

    pub fn declared_type(&self, name: &str) -> Result<ParamType, LookupError> {
        Ok(self.slot(name)?.param_type())
    }

    pub fn available_count(&self) -> usize {
        self.store.slots().iter().filter(|slot| slot.is_available()).count()
    }

    /// Every schema parameter in table order, with its value if it has one.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ParamType, Option<&ParamValue>)> {
        self.schema
            .entries()
            .iter()
            .zip(self.store.slots())
            .map(|(entry, slot)| (entry.name(), entry.param_type(), slot.value()))
    }

    /// A `tree`-like listing of every parameter.
    fn tree(&self) -> String {
        const TERMINATING_CONNECTOR: &str = "└── ";
        const NONTERMINATING_CONNECTOR: &str = "├── ";

        let mut outstr = String::from(".");
        let mut params = self.iter().peekable();
        while let Some((name, ty, value)) = params.next() {
            let connector = if params.peek().is_none() {
                TERMINATING_CONNECTOR
            } else {
                NONTERMINATING_CONNECTOR
            };
            outstr.push('\n');
            outstr.push_str(connector);
            outstr.push_str(name);
            outstr.push_str(" (");
            outstr.push_str(ty.name());
            outstr.push_str("): ");
            match value {
                Some(value) => outstr.push_str(&value.to_string()),
                None => outstr.push_str("<unavailable>"),
            }
        }
        outstr
    }
}

impl std::fmt::Display for ParsedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tree())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_str;

    fn camera_schema() -> Schema {
        Schema::new([
            ("userExposure", ParamType::Integer),
            ("userTempAdjust", ParamType::Integer),
            ("gain", ParamType::Double),
            ("outputFilename", ParamType::String),
        ])
        .unwrap()
    }

    #[test]
    fn unknown_names_are_errors() {
        let parsed = parse_str("userExposure 1\n", &camera_schema()).unwrap();
        let unknown = LookupError::UnknownParameter("exposure".to_string());
        assert_eq!(parsed.get("exposure").unwrap_err(), unknown);
        assert_eq!(parsed.get_as::<i32>("exposure").unwrap_err(), unknown);
        assert_eq!(parsed.is_available("exposure").unwrap_err(), unknown);
        let mut dest: i32 = 5;
        assert_eq!(parsed.read_into("exposure", &mut dest).unwrap_err(), unknown);
        assert_eq!(dest, 5);
    }

    #[test]
    fn type_mismatch_is_an_error() {
        let parsed = parse_str("userExposure 1\n", &camera_schema()).unwrap();
        assert_eq!(
            parsed.get_as::<f64>("userExposure").unwrap_err(),
            LookupError::TypeMismatch {
                name: "userExposure".to_string(),
                declared: ParamType::Integer,
                requested: ParamType::Double,
            }
        );
        // Unavailable parameters are still type checked.
        assert!(matches!(
            parsed.get_as::<String>("gain"),
            Err(LookupError::TypeMismatch { .. })
        ));
        assert_eq!(parsed.get_as::<f64>("gain").unwrap(), None);
    }

    #[test]
    fn get_returns_copies() {
        let parsed = parse_str("outputFilename out.txt\n", &camera_schema()).unwrap();
        let mut copy = parsed.get_as::<String>("outputFilename").unwrap().unwrap();
        copy.push_str(".bak");
        assert_eq!(
            parsed.get("outputFilename").unwrap(),
            Some(ParamValue::String("out.txt".to_string()))
        );
        assert_eq!(parsed.declared_type("outputFilename").unwrap(), ParamType::String);
    }

    #[test]
    fn iterates_in_schema_order() {
        let parsed = parse_str("gain 1.5\nuserExposure -600\n", &camera_schema()).unwrap();
        let names: Vec<&str> = parsed.iter().map(|(name, _, _)| name).collect();
        assert_eq!(names, ["userExposure", "userTempAdjust", "gain", "outputFilename"]);
        assert_eq!(parsed.available_count(), 2);
    }

    #[test]
    fn displays_as_tree() {
        let parsed = parse_str("userExposure -600\noutputFilename out.txt\n", &camera_schema()).unwrap();
        let expected = "\
.
├── userExposure (Integer): -600
├── userTempAdjust (Integer): <unavailable>
├── gain (Double): <unavailable>
└── outputFilename (String): \"out.txt\"";
        assert_eq!(parsed.to_string(), expected);
    }
}
