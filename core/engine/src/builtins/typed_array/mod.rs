//! This module implements the integer-indexed (typed array) object state.
//!
//! An integer-indexed object views a slice of an `ArrayBuffer` as elements
//! of one fixed kind. A view built over a resizable buffer without an
//! explicit length is *length-tracking*: its length is recomputed from the
//! backing buffer on every access.

use crate::{
    bigint::JsBigInt,
    context::Context,
    gc::{custom_trace, Finalize, Trace},
    object::{JsObject, ObjectData},
    value::JsValue,
    JsResult,
};

/// The element kind of an integer-indexed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypedArrayKind {
    /// `Int8Array`
    Int8,
    /// `Uint8Array`
    Uint8,
    /// `Uint8ClampedArray`
    Uint8Clamped,
    /// `Int16Array`
    Int16,
    /// `Uint16Array`
    Uint16,
    /// `Int32Array`
    Int32,
    /// `Uint32Array`
    Uint32,
    /// `BigInt64Array`
    BigInt64,
    /// `BigUint64Array`
    BigUint64,
    /// `Float32Array`
    Float32,
    /// `Float64Array`
    Float64,
}

impl TypedArrayKind {
    /// The size of one element in bytes.
    pub const fn element_size(self) -> u64 {
        match self {
            Self::Int8 | Self::Uint8 | Self::Uint8Clamped => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float32 => 4,
            Self::BigInt64 | Self::BigUint64 | Self::Float64 => 8,
        }
    }

    /// Whether elements of this kind are bigints rather than numbers.
    pub const fn is_big_int_element_type(self) -> bool {
        matches!(self, Self::BigInt64 | Self::BigUint64)
    }

    /// The constructor name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int8 => "Int8Array",
            Self::Uint8 => "Uint8Array",
            Self::Uint8Clamped => "Uint8ClampedArray",
            Self::Int16 => "Int16Array",
            Self::Uint16 => "Uint16Array",
            Self::Int32 => "Int32Array",
            Self::Uint32 => "Uint32Array",
            Self::BigInt64 => "BigInt64Array",
            Self::BigUint64 => "BigUint64Array",
            Self::Float32 => "Float32Array",
            Self::Float64 => "Float64Array",
        }
    }
}

/// The state of an integer-indexed exotic object.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-integer-indexed-exotic-objects
#[derive(Debug, Finalize)]
pub struct IntegerIndexed {
    /// The `[[ViewedArrayBuffer]]` internal slot.
    viewed_array_buffer: JsObject,
    /// The `[[TypedArrayName]]`-equivalent element kind tag.
    kind: TypedArrayKind,
    /// The `[[ByteOffset]]` internal slot.
    byte_offset: u64,
    /// The `[[ArrayLength]]` internal slot; `None` for length-tracking views.
    array_length: Option<u64>,
}

unsafe impl Trace for IntegerIndexed {
    custom_trace!(this, {
        mark(&this.viewed_array_buffer);
    });
}

impl IntegerIndexed {
    /// Create the integer-indexed state over a buffer.
    pub(crate) fn new(
        viewed_array_buffer: JsObject,
        kind: TypedArrayKind,
        byte_offset: u64,
        array_length: Option<u64>,
    ) -> Self {
        Self {
            viewed_array_buffer,
            kind,
            byte_offset,
            array_length,
        }
    }

    /// Get the element kind.
    pub fn kind(&self) -> TypedArrayKind {
        self.kind
    }

    /// Get a reference to the viewed array buffer object.
    pub fn viewed_array_buffer(&self) -> &JsObject {
        &self.viewed_array_buffer
    }

    /// Get the byte offset into the buffer.
    pub fn byte_offset(&self) -> u64 {
        self.byte_offset
    }

    /// Whether this view tracks the length of a resizable buffer.
    pub fn is_length_tracking(&self) -> bool {
        self.array_length.is_none()
    }

    /// The abstract operation `IsDetachedBuffer` applied to the viewed buffer.
    pub fn is_detached(&self) -> bool {
        self.viewed_array_buffer
            .borrow()
            .as_array_buffer()
            .map_or(true, super::array_buffer::ArrayBuffer::is_detached)
    }

    /// The current element count.
    ///
    /// Length-tracking views recompute it from the backing byte length on
    /// every call; fixed views return their stored `[[ArrayLength]]`, or 0
    /// when the view no longer fits the (shrunk) buffer.
    pub fn array_length(&self) -> u64 {
        let buffer_len = self
            .viewed_array_buffer
            .borrow()
            .as_array_buffer()
            .map_or(0, super::array_buffer::ArrayBuffer::byte_length);

        match self.array_length {
            Some(length) => {
                let needed = self.byte_offset + length * self.kind.element_size();
                if needed > buffer_len {
                    0
                } else {
                    length
                }
            }
            None => buffer_len.saturating_sub(self.byte_offset) / self.kind.element_size(),
        }
    }

    /// The current byte length of the view.
    pub fn byte_length(&self) -> u64 {
        self.array_length() * self.kind.element_size()
    }
}

/// The abstract operation `IsValidIntegerIndex`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-isvalidintegerindex
pub(crate) fn is_valid_integer_index(obj: &JsObject, index: f64) -> bool {
    let object = obj.borrow();
    let inner = object
        .as_integer_indexed()
        .expect("must be an integer-indexed object");

    // 1. If IsDetachedBuffer(O.[[ViewedArrayBuffer]]) is true, return false.
    if inner.is_detached() {
        return false;
    }

    // 2. If ! IsIntegralNumber(index) is false, return false.
    if index.fract() != 0.0 || index.is_infinite() || index.is_nan() {
        return false;
    }

    // 3. If index is -0𝔽, return false.
    if index == 0.0 && index.is_sign_negative() {
        return false;
    }

    // 4. If ℝ(index) < 0 or ℝ(index) ≥ O.[[ArrayLength]], return false.
    if index < 0.0 || index >= inner.array_length() as f64 {
        return false;
    }

    true
}

/// The abstract operation `IntegerIndexedElementGet`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-integerindexedelementget
pub(crate) fn integer_indexed_element_get(obj: &JsObject, index: f64) -> JsValue {
    // 1. If ! IsValidIntegerIndex(O, index) is false, return undefined.
    if !is_valid_integer_index(obj, index) {
        return JsValue::undefined();
    }

    let object = obj.borrow();
    let inner = object
        .as_integer_indexed()
        .expect("must be an integer-indexed object");
    let kind = inner.kind();
    let offset = (inner.byte_offset() + index as u64 * kind.element_size()) as usize;

    let buffer = inner.viewed_array_buffer().clone();
    drop(object);
    let buffer = buffer.borrow();
    let bytes = buffer
        .as_array_buffer()
        .and_then(super::array_buffer::ArrayBuffer::bytes)
        .expect("validity check ensured an attached buffer");

    // 4. Return GetValueFromBuffer(O.[[ViewedArrayBuffer]], indexedPosition, type).
    read_element(bytes, offset, kind)
}

/// The abstract operation `IntegerIndexedElementSet`.
///
/// The incoming value is coerced *before* the index is validated, so
/// conversion side effects (and their exceptions) happen even for
/// out-of-bounds writes; the write itself silently vanishes when invalid.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-integerindexedelementset
pub(crate) fn integer_indexed_element_set(
    obj: &JsObject,
    index: f64,
    value: &JsValue,
    context: &mut Context,
) -> JsResult<()> {
    let kind = obj
        .borrow()
        .as_integer_indexed()
        .expect("must be an integer-indexed object")
        .kind();

    // 1 - 2. Coerce the value per the element kind.
    let num_value = coerce_element(value, kind, context)?;

    // 3. If ! IsValidIntegerIndex(O, index) is true, perform the write.
    if !is_valid_integer_index(obj, index) {
        return Ok(());
    }

    let object = obj.borrow();
    let inner = object
        .as_integer_indexed()
        .expect("must be an integer-indexed object");
    let offset = (inner.byte_offset() + index as u64 * kind.element_size()) as usize;
    let buffer = inner.viewed_array_buffer().clone();
    drop(object);

    let mut buffer = buffer.borrow_mut();
    let bytes = buffer
        .as_array_buffer_mut()
        .and_then(super::array_buffer::ArrayBuffer::bytes_mut)
        .expect("validity check ensured an attached buffer");

    write_element(bytes, offset, num_value);
    Ok(())
}

/// An element value after kind-specific coercion, ready to be written.
enum ElementValue {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
}

fn coerce_element(
    value: &JsValue,
    kind: TypedArrayKind,
    context: &mut Context,
) -> JsResult<ElementValue> {
    Ok(match kind {
        TypedArrayKind::Int8 => ElementValue::I8(value.to_i8(context)?),
        TypedArrayKind::Uint8 => ElementValue::U8(value.to_u8(context)?),
        TypedArrayKind::Uint8Clamped => ElementValue::U8(value.to_uint8_clamp(context)?),
        TypedArrayKind::Int16 => ElementValue::I16(value.to_i16(context)?),
        TypedArrayKind::Uint16 => ElementValue::U16(value.to_u16(context)?),
        TypedArrayKind::Int32 => ElementValue::I32(value.to_i32(context)?),
        TypedArrayKind::Uint32 => ElementValue::U32(value.to_u32(context)?),
        TypedArrayKind::BigInt64 => {
            ElementValue::I64(value.to_bigint(context)?.to_big_int64())
        }
        TypedArrayKind::BigUint64 => {
            ElementValue::U64(value.to_bigint(context)?.to_big_uint64())
        }
        TypedArrayKind::Float32 => ElementValue::F32(value.to_number(context)? as f32),
        TypedArrayKind::Float64 => ElementValue::F64(value.to_number(context)?),
    })
}

fn read_element(bytes: &[u8], offset: usize, kind: TypedArrayKind) -> JsValue {
    macro_rules! read {
        ($ty:ty) => {{
            let mut buf = [0u8; std::mem::size_of::<$ty>()];
            buf.copy_from_slice(&bytes[offset..offset + std::mem::size_of::<$ty>()]);
            <$ty>::from_ne_bytes(buf)
        }};
    }

    match kind {
        TypedArrayKind::Int8 => JsValue::new(read!(i8) as i32),
        TypedArrayKind::Uint8 | TypedArrayKind::Uint8Clamped => JsValue::new(read!(u8) as i32),
        TypedArrayKind::Int16 => JsValue::new(read!(i16) as i32),
        TypedArrayKind::Uint16 => JsValue::new(read!(u16) as i32),
        TypedArrayKind::Int32 => JsValue::new(read!(i32)),
        TypedArrayKind::Uint32 => JsValue::new(read!(u32)),
        TypedArrayKind::BigInt64 => JsValue::bigint(JsBigInt::from(read!(i64))),
        TypedArrayKind::BigUint64 => JsValue::bigint(JsBigInt::from(read!(u64))),
        TypedArrayKind::Float32 => JsValue::rational(f64::from(read!(f32))),
        TypedArrayKind::Float64 => JsValue::rational(read!(f64)),
    }
}

fn write_element(bytes: &mut [u8], offset: usize, value: ElementValue) {
    macro_rules! put {
        ($value:expr) => {{
            let raw = $value.to_ne_bytes();
            bytes[offset..offset + raw.len()].copy_from_slice(&raw);
        }};
    }

    match value {
        ElementValue::I8(v) => put!(v),
        ElementValue::U8(v) => put!(v),
        ElementValue::I16(v) => put!(v),
        ElementValue::U16(v) => put!(v),
        ElementValue::I32(v) => put!(v),
        ElementValue::U32(v) => put!(v),
        ElementValue::I64(v) => put!(v),
        ElementValue::U64(v) => put!(v),
        ElementValue::F32(v) => put!(v),
        ElementValue::F64(v) => put!(v),
    }
}

/// `IntegerIndexedObjectCreate`: allocate a view of `kind` over `buffer`.
///
/// Passing `None` as `array_length` over a resizable buffer produces a
/// length-tracking view.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-integerindexedobjectcreate
pub fn integer_indexed_object_create(
    buffer: JsObject,
    kind: TypedArrayKind,
    byte_offset: u64,
    array_length: Option<u64>,
    context: &mut Context,
) -> JsResult<JsObject> {
    {
        let object = buffer.borrow();
        let data = object.as_array_buffer().ok_or_else(|| {
            context.construct_type_error("typed array must view an ArrayBuffer")
        })?;

        if byte_offset % kind.element_size() != 0 {
            return Err(context.construct_range_error(format!(
                "start offset of {} must be a multiple of {}",
                kind.name(),
                kind.element_size()
            )));
        }

        let needed = match array_length {
            Some(length) => byte_offset + length * kind.element_size(),
            None => byte_offset,
        };
        if needed > data.byte_length() {
            return Err(
                context.construct_range_error("typed array does not fit in its buffer")
            );
        }
    }

    let prototype = context.standard_objects().object_object().prototype();
    Ok(JsObject::from_proto_and_data(
        prototype.into(),
        ObjectData::integer_indexed(IntegerIndexed::new(buffer, kind, byte_offset, array_length)),
    ))
}
