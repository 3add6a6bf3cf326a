use std::collections::HashMap;

use parallax_vr::property::{PropertyKey, PropertyStatus, PropertyType, PropertyValue};
use parallax_vr::types::{DeviceClass, Matrix34};

/// A value kind that can be read out of a [`PropertyStore`].
pub trait PropertyTypedValue: Default + Sized {
    /// Tag this type corresponds to in the key table.
    const KIND: PropertyType;

    /// Checked extraction; `None` when the stored tag does not match.
    fn from_value(value: &PropertyValue) -> Option<Self>;
}

impl PropertyTypedValue for bool {
    const KIND: PropertyType = PropertyType::Bool;
    fn from_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl PropertyTypedValue for f32 {
    const KIND: PropertyType = PropertyType::Float;
    fn from_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl PropertyTypedValue for i32 {
    const KIND: PropertyType = PropertyType::Int32;
    fn from_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Int32(v) => Some(*v),
            _ => None,
        }
    }
}

impl PropertyTypedValue for u64 {
    const KIND: PropertyType = PropertyType::Uint64;
    fn from_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Uint64(v) => Some(*v),
            _ => None,
        }
    }
}

impl PropertyTypedValue for Matrix34 {
    const KIND: PropertyType = PropertyType::Matrix34;
    fn from_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Matrix34(v) => Some(*v),
            _ => None,
        }
    }
}

impl PropertyTypedValue for String {
    const KIND: PropertyType = PropertyType::String;
    fn from_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::String(v) => Some(v.clone()),
            _ => None,
        }
    }
}

/// Per-device table of property values, validated on every read.
///
/// Created empty, populated once while the device is configured, then read
/// for the rest of the device's lifetime. Invariant: a key is only present
/// with a value whose tag matches the key's expected type.
///
/// Reads are pure lookups; every failure is a [`PropertyStatus`], never a
/// panic. Repeated reads against unchanged state return identical results.
#[derive(Debug, Default)]
pub struct PropertyStore {
    values: HashMap<PropertyKey, PropertyValue>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the value for `key`.
    ///
    /// The caller guarantees the tag matches the key's expected type; the
    /// store asserts the invariant in debug builds and never coerces.
    pub fn set(&mut self, key: PropertyKey, value: PropertyValue) {
        debug_assert_eq!(
            value.kind(),
            key.expected_type(),
            "property {key:?} stored with mismatched tag"
        );
        self.values.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Validated read of `key` as `T`, on behalf of a device of class
    /// `class`. Failures return `T::default()` alongside the status.
    ///
    /// Validation precedence is part of the host contract and is checked
    /// in this exact order: wrong data type, wrong device class, invalid
    /// device, value not provided.
    pub fn get<T: PropertyTypedValue>(
        &self,
        key: PropertyKey,
        class: DeviceClass,
    ) -> (T, PropertyStatus) {
        let status = Self::check::<T>(key, class);
        if status != PropertyStatus::Success {
            return (T::default(), status);
        }

        match self.values.get(&key).and_then(T::from_value) {
            Some(value) => (value, PropertyStatus::Success),
            None => (T::default(), PropertyStatus::ValueNotProvidedByDevice),
        }
    }

    /// Bounded-buffer read of a string property.
    ///
    /// On success the stored string plus a trailing NUL is copied into
    /// `buf` and the encoded length (NUL included) is returned. If `buf`
    /// is too small, the status is [`PropertyStatus::BufferTooSmall`], the
    /// required length is returned and `buf` is not written at all; its
    /// contents are unmodified by the call (no zero-fill is promised).
    pub fn string_into(
        &self,
        key: PropertyKey,
        class: DeviceClass,
        buf: &mut [u8],
    ) -> (u32, PropertyStatus) {
        let (value, status) = self.get::<String>(key, class);
        if status != PropertyStatus::Success {
            return (0, status);
        }

        let needed = value.len() + 1; // trailing NUL
        let needed_u32 = u32::try_from(needed).unwrap_or(u32::MAX);
        if needed > buf.len() {
            return (needed_u32, PropertyStatus::BufferTooSmall);
        }

        buf[..value.len()].copy_from_slice(value.as_bytes());
        buf[value.len()] = 0;
        (needed_u32, PropertyStatus::Success)
    }

    fn check<T: PropertyTypedValue>(key: PropertyKey, class: DeviceClass) -> PropertyStatus {
        if T::KIND != key.expected_type() {
            return PropertyStatus::WrongDataType;
        }

        if !key.applies_to(class) {
            return PropertyStatus::WrongDeviceClass;
        }

        if class == DeviceClass::Invalid {
            return PropertyStatus::InvalidDevice;
        }

        PropertyStatus::Success
    }
}
