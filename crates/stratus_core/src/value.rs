//! Runtime input values.
//!
//! [`Input`] is the exhaustive union of every value the SDK can hand to the
//! marshaling engine: plain scalars and collections, assets and archives,
//! resource handles, and asynchronous [`Output`]s. It replaces dynamic
//! typing with one tagged union that the engine layer matches exhaustively.
//!
//! Record types participate through compile-time field tables: the SDK code
//! generator emits an [`InputRecord`] implementation (and a matching
//! [`ToInput`] one) alongside each args type, pairing every wire key with a
//! typed accessor. Fields without a wire key simply do not appear in the
//! table.

use core::fmt;
use std::collections::BTreeMap;
use std::sync::Arc;

use hashbrown::HashMap;

use crate::asset::{Archive, Asset};
use crate::output::Output;
use crate::resource::ResourceRef;
use crate::urn::Urn;

/// String-keyed runtime value map.
pub type InputMap = HashMap<String, Input>;

/// A runtime value that can be marshaled to the wire format.
#[derive(Clone)]
pub enum Input {
    /// Absent value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Number; integers widen to `f64` on the wire.
    Number(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered sequence.
    Array(Vec<Input>),
    /// String-keyed mapping.
    Map(InputMap),
    /// A record with a compile-time field table.
    Record(Vec<InputField>),
    /// File-like content.
    Asset(Asset),
    /// A collection of file-like content.
    Archive(Archive),
    /// Reference to a resource handle.
    Resource(ResourceRef),
    /// A value that may not be known yet.
    Output(Output<Input>),
}

impl Input {
    /// Whether this is the null value.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Input::Null)
    }

    /// Short label for error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Input::Null => "null",
            Input::Bool(_) => "bool",
            Input::Number(_) => "number",
            Input::String(_) => "string",
            Input::Array(_) => "array",
            Input::Map(_) => "map",
            Input::Record(_) => "record",
            Input::Asset(_) => "asset",
            Input::Archive(_) => "archive",
            Input::Resource(_) => "resource",
            Input::Output(_) => "output",
        }
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Null => f.write_str("Null"),
            Input::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Input::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Input::String(s) => f.debug_tuple("String").field(s).finish(),
            Input::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Input::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Input::Record(fields) => f.debug_tuple("Record").field(fields).finish(),
            Input::Asset(asset) => f.debug_tuple("Asset").field(asset).finish(),
            Input::Archive(archive) => f.debug_tuple("Archive").field(archive).finish(),
            Input::Resource(_) => f.write_str("Resource(..)"),
            Input::Output(output) => f.debug_tuple("Output").field(output).finish(),
        }
    }
}

/// One entry of a record's field table: a wire key paired with its value.
#[derive(Clone, Debug)]
pub struct InputField {
    /// Wire key of the field.
    pub key: &'static str,
    /// The field's value.
    pub value: Input,
}

impl InputField {
    /// Creates a field entry by converting the given value.
    #[must_use]
    pub fn new(key: &'static str, value: &(impl ToInput + ?Sized)) -> Self {
        Self {
            key,
            value: value.to_input(),
        }
    }
}

/// Compile-time field table for a record type.
///
/// Implemented (together with [`ToInput`]) by generated args types; written
/// by hand in tests.
pub trait InputRecord {
    /// The record's field table, one entry per wire-visible field.
    fn input_fields(&self) -> Vec<InputField>;
}

/// Conversion into a runtime [`Input`] value.
pub trait ToInput {
    /// Converts this value.
    fn to_input(&self) -> Input;
}

impl ToInput for Input {
    fn to_input(&self) -> Input {
        self.clone()
    }
}

impl ToInput for bool {
    fn to_input(&self) -> Input {
        Input::Bool(*self)
    }
}

macro_rules! impl_to_input_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToInput for $ty {
                fn to_input(&self) -> Input {
                    Input::Number(*self as f64)
                }
            }
        )*
    };
}

impl_to_input_number!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl ToInput for str {
    fn to_input(&self) -> Input {
        Input::String(self.to_string())
    }
}

impl ToInput for String {
    fn to_input(&self) -> Input {
        Input::String(self.clone())
    }
}

impl ToInput for Urn {
    fn to_input(&self) -> Input {
        Input::String(self.as_str().to_string())
    }
}

impl<T: ToInput> ToInput for Option<T> {
    fn to_input(&self) -> Input {
        match self {
            Some(value) => value.to_input(),
            None => Input::Null,
        }
    }
}

impl<T: ToInput> ToInput for Vec<T> {
    fn to_input(&self) -> Input {
        Input::Array(self.iter().map(ToInput::to_input).collect())
    }
}

impl<T: ToInput> ToInput for HashMap<String, T> {
    fn to_input(&self) -> Input {
        Input::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_input()))
                .collect(),
        )
    }
}

impl<T: ToInput> ToInput for BTreeMap<String, T> {
    fn to_input(&self) -> Input {
        Input::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_input()))
                .collect(),
        )
    }
}

impl ToInput for Asset {
    fn to_input(&self) -> Input {
        Input::Asset(self.clone())
    }
}

impl ToInput for Archive {
    fn to_input(&self) -> Input {
        Input::Archive(self.clone())
    }
}

impl ToInput for ResourceRef {
    fn to_input(&self) -> Input {
        Input::Resource(Arc::clone(self))
    }
}

/// Erases a typed output to an `Output<Input>`.
///
/// Spawns the erasing task, so this must run within a Tokio runtime (as
/// must everything else that touches outputs).
impl<T> ToInput for Output<T>
where
    T: ToInput + Clone + Send + Sync + 'static,
{
    fn to_input(&self) -> Input {
        Input::Output(self.apply(|value| value.to_input()))
    }
}

/// Lifts a value into a canonical output.
///
/// An existing output is returned as-is (erased); everything else resolves
/// immediately to a known, non-secret output. Output-producing fields
/// nested inside records and collections ride along inside the value tree
/// and are awaited when the value is marshaled.
#[must_use]
pub fn to_output(value: &(impl ToInput + ?Sized)) -> Output<Input> {
    match value.to_input() {
        Input::Output(output) => output,
        input => Output::resolved(input),
    }
}
