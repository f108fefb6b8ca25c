//! This module implements the `ArrayBuffer` backing store.
//!
//! The core only needs the byte storage that integer-indexed exotic objects
//! view into: allocation, detachment, and optional resizability for
//! length-tracking views. The `ArrayBuffer` builtin surface beyond that is
//! an external library concern.

use crate::{
    context::Context,
    gc::{empty_trace, Finalize, Trace},
    object::{JsObject, ObjectData},
    JsResult,
};

/// The raw byte storage of an `ArrayBuffer`.
#[derive(Debug, Clone, Finalize)]
pub struct ArrayBuffer {
    /// The `[[ArrayBufferData]]` internal slot; `None` when detached.
    data: Option<Vec<u8>>,
    /// The `[[ArrayBufferMaxByteLength]]` internal slot; `Some` makes the
    /// buffer resizable.
    max_byte_length: Option<u64>,
}

unsafe impl Trace for ArrayBuffer {
    empty_trace!();
}

impl ArrayBuffer {
    /// `CreateByteDataBlock`: allocate a zeroed buffer of `byte_length` bytes.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-createbytedatablock
    pub fn new(byte_length: u64) -> Self {
        Self {
            data: Some(vec![0u8; byte_length as usize]),
            max_byte_length: None,
        }
    }

    /// Allocate a resizable buffer with the given current and maximum sizes.
    pub fn new_resizable(byte_length: u64, max_byte_length: u64) -> Self {
        Self {
            data: Some(vec![0u8; byte_length as usize]),
            max_byte_length: Some(max_byte_length),
        }
    }

    /// The abstract operation `IsDetachedBuffer`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-isdetachedbuffer
    #[inline]
    pub fn is_detached(&self) -> bool {
        self.data.is_none()
    }

    /// Detach the buffer, dropping its storage.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-detacharraybuffer
    #[inline]
    pub fn detach(&mut self) {
        self.data = None;
    }

    /// Whether this buffer was allocated as resizable.
    #[inline]
    pub fn is_resizable(&self) -> bool {
        self.max_byte_length.is_some()
    }

    /// The current byte length; `0` when detached.
    #[inline]
    pub fn byte_length(&self) -> u64 {
        self.data.as_ref().map_or(0, |data| data.len() as u64)
    }

    /// Resize a resizable buffer, zero-filling growth.
    ///
    /// Returns `false` when the buffer is detached, fixed-length, or the new
    /// length exceeds the maximum.
    pub fn resize(&mut self, new_byte_length: u64) -> bool {
        let max = match self.max_byte_length {
            Some(max) => max,
            None => return false,
        };
        if new_byte_length > max {
            return false;
        }
        match &mut self.data {
            Some(data) => {
                data.resize(new_byte_length as usize, 0);
                true
            }
            None => false,
        }
    }

    /// Borrow the bytes; `None` when detached.
    #[inline]
    pub(crate) fn bytes(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Mutably borrow the bytes; `None` when detached.
    #[inline]
    pub(crate) fn bytes_mut(&mut self) -> Option<&mut [u8]> {
        self.data.as_deref_mut()
    }
}

/// `AllocateArrayBuffer`: wrap a byte block into an `ArrayBuffer` object.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-allocatearraybuffer
pub fn allocate_array_buffer(byte_length: u64, context: &mut Context) -> JsResult<JsObject> {
    let prototype = context.standard_objects().object_object().prototype();
    Ok(JsObject::from_proto_and_data(
        prototype.into(),
        ObjectData::array_buffer(ArrayBuffer::new(byte_length)),
    ))
}

/// Allocate a resizable `ArrayBuffer` object.
pub fn allocate_resizable_array_buffer(
    byte_length: u64,
    max_byte_length: u64,
    context: &mut Context,
) -> JsResult<JsObject> {
    if byte_length > max_byte_length {
        return Err(
            context.construct_range_error("ArrayBuffer length exceeds its maximum byte length")
        );
    }
    let prototype = context.standard_objects().object_object().prototype();
    Ok(JsObject::from_proto_and_data(
        prototype.into(),
        ObjectData::array_buffer(ArrayBuffer::new_resizable(byte_length, max_byte_length)),
    ))
}

#[cfg(test)]
mod tests {
    use super::ArrayBuffer;

    #[test]
    fn detach_drops_storage() {
        let mut buffer = ArrayBuffer::new(8);
        assert_eq!(buffer.byte_length(), 8);
        assert!(!buffer.is_detached());

        buffer.detach();
        assert!(buffer.is_detached());
        assert_eq!(buffer.byte_length(), 0);
        assert!(buffer.bytes().is_none());
    }

    #[test]
    fn resize_respects_maximum() {
        let mut buffer = ArrayBuffer::new_resizable(4, 16);
        assert!(buffer.resize(16));
        assert_eq!(buffer.byte_length(), 16);
        assert!(!buffer.resize(17));

        let mut fixed = ArrayBuffer::new(4);
        assert!(!fixed.resize(8));
    }
}
