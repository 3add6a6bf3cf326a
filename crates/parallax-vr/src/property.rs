use crate::types::{DeviceClass, Matrix34};

/// The six value kinds a property can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    Bool,
    Float,
    Int32,
    Uint64,
    Matrix34,
    String,
}

/// Queryable device attribute.
///
/// Keys are banded by the device class they apply to: 1000s are valid for
/// every class, 2000s for HMDs only, 3000s for controllers only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PropertyKey {
    // General properties, valid for every device class.
    TrackingSystemName = 1000,
    ModelNumber = 1001,
    SerialNumber = 1002,
    RenderModelName = 1003,
    WillDriftInYaw = 1004,
    ManufacturerName = 1005,
    DeviceIsWireless = 1010,
    DeviceIsCharging = 1011,
    DeviceBatteryPercentage = 1012,
    StatusDisplayTransform = 1013,
    FirmwareUpdateAvailable = 1014,
    FirmwareManualUpdate = 1015,
    HardwareRevision = 1017,
    BlockServerShutdown = 1023,
    ContainsProximitySensor = 1025,
    DeviceProvidesBatteryStatus = 1026,
    DeviceCanPowerOff = 1027,
    DeviceClass = 1029,
    HasCamera = 1030,

    // HMD-only properties.
    SecondsFromVsyncToPhotons = 2001,
    DisplayFrequency = 2002,
    UserIpdMeters = 2003,
    CurrentUniverseId = 2004,
    PreviousUniverseId = 2005,
    DisplayFirmwareVersion = 2006,
    IsOnDesktop = 2007,
    EdidVendorId = 2011,
    EdidProductId = 2015,
    CameraToHeadTransform = 2016,

    // Controller-only properties.
    AttachedDeviceId = 3000,
    SupportedButtons = 3001,
    Axis0Type = 3002,
}

impl PropertyKey {
    /// Integer code as exchanged with the host.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// The value kind a conforming store holds for this key.
    pub fn expected_type(self) -> PropertyType {
        use PropertyKey::*;
        match self {
            WillDriftInYaw | DeviceIsWireless | DeviceIsCharging | FirmwareUpdateAvailable
            | FirmwareManualUpdate | BlockServerShutdown | ContainsProximitySensor
            | DeviceProvidesBatteryStatus | DeviceCanPowerOff | HasCamera | IsOnDesktop => {
                PropertyType::Bool
            }
            DeviceBatteryPercentage | SecondsFromVsyncToPhotons | DisplayFrequency
            | UserIpdMeters => PropertyType::Float,
            DeviceClass | EdidVendorId | EdidProductId | Axis0Type => PropertyType::Int32,
            HardwareRevision | CurrentUniverseId | PreviousUniverseId | DisplayFirmwareVersion
            | SupportedButtons => PropertyType::Uint64,
            StatusDisplayTransform | CameraToHeadTransform => PropertyType::Matrix34,
            TrackingSystemName | ModelNumber | SerialNumber | RenderModelName
            | ManufacturerName | AttachedDeviceId => PropertyType::String,
        }
    }

    /// Whether this key is meaningful for the given device class.
    ///
    /// General keys apply to every class, the `Invalid` sentinel included;
    /// the invalid-device check is a separate, later validation step.
    pub fn applies_to(self, class: DeviceClass) -> bool {
        match self.code() {
            1000..=1999 => true,
            2000..=2999 => class == DeviceClass::Hmd,
            _ => class == DeviceClass::Controller,
        }
    }
}

/// A property value, tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Float(f32),
    Int32(i32),
    Uint64(u64),
    Matrix34(Matrix34),
    String(String),
}

impl PropertyValue {
    pub fn kind(&self) -> PropertyType {
        match self {
            PropertyValue::Bool(_) => PropertyType::Bool,
            PropertyValue::Float(_) => PropertyType::Float,
            PropertyValue::Int32(_) => PropertyType::Int32,
            PropertyValue::Uint64(_) => PropertyType::Uint64,
            PropertyValue::Matrix34(_) => PropertyType::Matrix34,
            PropertyValue::String(_) => PropertyType::String,
        }
    }
}

/// Outcome of a property read, surfaced to the host alongside the value.
///
/// Every variant is an expected, steady-state outcome; none is fatal and
/// none triggers a retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyStatus {
    Success,
    WrongDataType,
    WrongDeviceClass,
    InvalidDevice,
    ValueNotProvidedByDevice,
    BufferTooSmall,
}

impl PropertyStatus {
    pub fn is_success(self) -> bool {
        self == PropertyStatus::Success
    }
}
