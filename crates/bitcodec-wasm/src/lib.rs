//! WASM bindings for the `bitcodec` field encoder and decoder.
//!
//! A layout is described in JSON as an array of field descriptions (the
//! shape of [`bitcodec::serde::FieldDef`]), compiled once, then used from
//! JavaScript to decode buffers into objects and encode objects into
//! buffers.
//!
//! ```text
//! // Pseudo TypeScript example
//! //
//! // const layout = new WasmLayout(JSON.stringify([
//! //   { name: "version", layout: { type: "Bits", byte_offset: 0, bit_count: 3 } },
//! //   { name: "length", layout: { type: "Aligned", byte_offset: 1, byte_count: 2 },
//! //     endianness: "BigEndian" },
//! // ]));
//! //
//! // const bytes = layout.encode({ version: 5n, length: 258n });
//! // const values = layout.decode(bytes); // { version: 5n, length: 258n }
//! ```
//!
//! Values cross the boundary as `BigInt`s so that all 64 bits survive.
//! Error values are converted to `JsValue` with a `Debug` representation.

mod convert;

use std::collections::BTreeMap;

use bitcodec::serde::FieldDef;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Compiled set of named fields usable from JavaScript.
#[wasm_bindgen]
pub struct WasmLayout {
    fields: convert::NamedFields,
}

#[wasm_bindgen]
impl WasmLayout {
    /// Compiles a layout from a JSON array of field descriptions.
    ///
    /// Fails on malformed JSON, empty or duplicate names, and fields whose
    /// width or bit offset is out of range.
    #[wasm_bindgen(constructor)]
    pub fn new(layout_json: &str) -> Result<WasmLayout, JsValue> {
        let defs: Vec<FieldDef> = serde_json::from_str(layout_json).map_err(convert::error_to_js)?;
        let fields = convert::defs_to_fields(defs).map_err(convert::error_to_js)?;
        Ok(WasmLayout { fields })
    }

    /// Smallest buffer length, in bytes, that holds every field.
    pub fn required_len(&self) -> Result<usize, JsValue> {
        convert::required_len(&self.fields).map_err(convert::error_to_js)
    }

    /// Decodes every field of `data` into an object keyed by field name.
    pub fn decode(&self, data: &[u8]) -> Result<JsValue, JsValue> {
        let values = convert::decode_values(&self.fields, data).map_err(convert::error_to_js)?;

        let serializer = serde_wasm_bindgen::Serializer::new().serialize_large_number_types_as_bigints(true);
        values
            .serialize(&serializer)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Encodes an object of field values into a fresh, zeroed buffer of
    /// [`required_len`](WasmLayout::required_len) bytes.
    pub fn encode(&self, values: JsValue) -> Result<Vec<u8>, JsValue> {
        let len = self.required_len()?;
        let mut data = convert::zeroed_buffer(len).map_err(convert::error_to_js)?;
        self.encode_into(&mut data, values)?;
        Ok(data)
    }

    /// Encodes an object of field values into an existing buffer, leaving
    /// bits outside the fields untouched.
    pub fn encode_into(&self, data: &mut [u8], values: JsValue) -> Result<(), JsValue> {
        let values: BTreeMap<String, u64> =
            serde_wasm_bindgen::from_value(values).map_err(|e| JsValue::from_str(&e.to_string()))?;

        convert::encode_values(&self.fields, &values, data).map_err(convert::error_to_js)
    }
}
