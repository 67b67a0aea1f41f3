use crate::cfgtypes::{ParamType, ParamValue};
use crate::schema::Schema;

/// Default bound, in grapheme clusters, on a stored string value.
pub const PARAM_VALUE_LENGTH: usize = 256;

/// The decoded value of one schema parameter.
/// Starts zeroed and unavailable. Becomes available on the first matching line and
/// stays that way; later matches only replace the value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSlot {
    value: ParamValue,
    available: bool,
}

impl ValueSlot {
    fn new(ty: ParamType) -> Self {
        Self {
            value: ParamValue::zero(ty),
            available: false,
        }
    }

    pub fn param_type(&self) -> ParamType {
        self.value.param_type()
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// The value, if one was parsed.
    pub fn value(&self) -> Option<&ParamValue> {
        self.available.then_some(&self.value)
    }
}

/// One slot per schema entry, same order as the schema.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValueStore {
    slots: Vec<ValueSlot>,
}

impl ValueStore {
    pub(crate) fn for_schema(schema: &Schema) -> Self {
        Self {
            slots: schema
                .entries()
                .iter()
                .map(|entry| ValueSlot::new(entry.param_type()))
                .collect(),
        }
    }

    /// Stores `value` at `index` and marks the slot available.
    /// Returns whether the slot already held a parsed value.
    pub(crate) fn set(&mut self, index: usize, value: ParamValue) -> bool {
        let slot = &mut self.slots[index];
        debug_assert_eq!(slot.param_type(), value.param_type());
        slot.value = value;
        std::mem::replace(&mut slot.available, true)
    }

    pub(crate) fn slot(&self, index: usize) -> Option<&ValueSlot> {
        self.slots.get(index)
    }

    pub(crate) fn slots(&self) -> &[ValueSlot] {
        &self.slots
    }
}
