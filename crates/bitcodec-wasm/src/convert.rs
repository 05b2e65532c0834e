use std::collections::BTreeMap;

use bitcodec::{CodecError, Field, field, serde::FieldDef};
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised while building a layout or moving values in and out of it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Field name is empty or only whitespace.
    #[error("field name is empty")]
    InvalidFieldName,
    /// Two fields share a name.
    #[error("duplicate field name: {0}")]
    DuplicateFieldName(String),
    /// A field description failed validation.
    #[error("invalid field {name}: {error}")]
    InvalidField { name: String, error: CodecError },
    /// No value was supplied for a field of the layout.
    #[error("missing value for field {0}")]
    MissingValue(String),
    /// A value was supplied for a name the layout does not have.
    #[error("unknown field: {0}")]
    UnknownField(String),
    /// A buffer of the layout's length could not be allocated.
    #[error("cannot allocate a {0} byte buffer")]
    Allocation(usize),
    /// The buffer cannot hold every field of the layout.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Named, validated fields in definition order.
pub type NamedFields = Vec<(String, Field)>;

pub fn defs_to_fields(defs: Vec<FieldDef>) -> Result<NamedFields, LayoutError> {
    let mut out: NamedFields = Vec::with_capacity(defs.len());

    for def in defs {
        if def.name.trim().is_empty() {
            return Err(LayoutError::InvalidFieldName);
        }
        if out.iter().any(|(name, _)| *name == def.name) {
            return Err(LayoutError::DuplicateFieldName(def.name));
        }

        let name = def.name.clone();
        let field = Field::try_from(def)
            .and_then(|field| field.bit_span().map(|_| field))
            .map_err(|error| LayoutError::InvalidField {
                name: name.clone(),
                error,
            })?;

        out.push((name, field));
    }

    Ok(out)
}

pub fn required_len(fields: &NamedFields) -> Result<usize, LayoutError> {
    let fields: Vec<Field> = fields.iter().map(|(_, field)| *field).collect();
    Ok(field::required_len(&fields)?)
}

pub fn decode_values(fields: &NamedFields, data: &[u8]) -> Result<BTreeMap<String, u64>, LayoutError> {
    fields
        .iter()
        .map(|(name, field)| Ok::<_, LayoutError>((name.clone(), field.read(data)?)))
        .collect()
}

/// Writes every value into `data`. All names and the buffer size are
/// checked before the first write, so on error `data` is unchanged.
pub fn encode_values(
    fields: &NamedFields,
    values: &BTreeMap<String, u64>,
    data: &mut [u8],
) -> Result<(), LayoutError> {
    if let Some(name) = values
        .keys()
        .find(|key| !fields.iter().any(|(name, _)| name == *key))
    {
        return Err(LayoutError::UnknownField(name.clone()));
    }
    if let Some((name, _)) = fields.iter().find(|(name, _)| !values.contains_key(name)) {
        return Err(LayoutError::MissingValue(name.clone()));
    }

    let needed = required_len(fields)?;
    if needed > data.len() {
        return Err(LayoutError::Codec(CodecError::OutOfBounds {
            end_bit: needed.saturating_mul(8),
            buffer_bits: data.len().saturating_mul(8),
        }));
    }

    for (name, field) in fields {
        field.write(data, values[name])?;
    }

    Ok(())
}

/// Zeroed buffer of `len` bytes, failing instead of aborting when the
/// allocation cannot be made.
pub fn zeroed_buffer(len: usize) -> Result<Vec<u8>, LayoutError> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| LayoutError::Allocation(len))?;
    data.resize(len, 0);

    Ok(data)
}

pub fn error_to_js<E: std::fmt::Debug>(e: E) -> JsValue {
    JsValue::from_str(&format!("{:?}", e))
}
