//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database, together with the create/update payloads the API
//! accepts for each table. API-only views live next to their handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub company: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insert payload for a user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub company: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Device {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub model: Option<String>,
    pub ip: Option<String>,
    pub status: String,
    pub location: Option<String>,
    pub last_seen: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDevice {
    #[validate(length(min = 1, max = 255, message = "Device name is required"))]
    pub name: String,

    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 255, message = "Device type is required"))]
    pub device_type: String,

    pub model: Option<String>,
    pub ip: Option<String>,

    #[validate(length(min = 1, message = "Status must not be empty"))]
    pub status: Option<String>,

    pub location: Option<String>,
    pub last_seen: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateDevice {
    #[validate(length(min = 1, max = 255, message = "Device name must not be empty"))]
    pub name: Option<String>,

    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 255, message = "Device type must not be empty"))]
    pub device_type: Option<String>,

    pub model: Option<String>,
    pub ip: Option<String>,

    #[validate(length(min = 1, message = "Status must not be empty"))]
    pub status: Option<String>,

    pub location: Option<String>,
    pub last_seen: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: String,
    pub device_id: String,
    pub name: String,
    pub address: String,
    pub data_type: String,
    pub value: Option<String>,
    pub unit: Option<String>,
    pub access: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTag {
    #[validate(length(min = 1, message = "Device ID is required"))]
    pub device_id: String,

    #[validate(length(min = 1, max = 255, message = "Tag name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Tag address is required"))]
    pub address: String,

    #[validate(length(min = 1, max = 64, message = "Data type is required"))]
    pub data_type: String,

    pub value: Option<String>,
    pub unit: Option<String>,

    #[validate(length(min = 1, message = "Access must not be empty"))]
    pub access: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTag {
    #[validate(length(min = 1, max = 255, message = "Tag name must not be empty"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Tag address must not be empty"))]
    pub address: Option<String>,

    #[validate(length(min = 1, max = 64, message = "Data type must not be empty"))]
    pub data_type: Option<String>,

    pub value: Option<String>,
    pub unit: Option<String>,

    #[validate(length(min = 1, message = "Access must not be empty"))]
    pub access: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Alarm {
    pub id: String,
    pub device_id: String,
    pub message: String,
    pub severity: String,
    pub timestamp: DateTime<Utc>,
    pub acknowledged: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAlarm {
    #[validate(length(min = 1, message = "Device ID is required"))]
    pub device_id: String,

    #[validate(length(min = 1, message = "Alarm message is required"))]
    pub message: String,

    #[validate(length(min = 1, max = 64, message = "Severity is required"))]
    pub severity: String,

    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub acknowledged: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAlarm {
    #[validate(length(min = 1, message = "Alarm message must not be empty"))]
    pub message: Option<String>,

    #[validate(length(min = 1, max = 64, message = "Severity must not be empty"))]
    pub severity: Option<String>,

    pub timestamp: Option<DateTime<Utc>>,
    pub acknowledged: Option<bool>,
}

// View models for API responses (with joined data)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceWithChildren {
    #[serde(flatten)]
    pub device: Device,
    pub tags: Vec<Tag>,
    pub alarms: Vec<Alarm>,
}

impl UpdateDevice {
    /// Overlays the provided fields onto an existing device.
    pub fn apply(self, device: &mut Device) {
        if let Some(name) = self.name {
            device.name = name;
        }
        if let Some(device_type) = self.device_type {
            device.device_type = device_type;
        }
        if let Some(status) = self.status {
            device.status = status;
        }
        if self.model.is_some() {
            device.model = self.model;
        }
        if self.ip.is_some() {
            device.ip = self.ip;
        }
        if self.location.is_some() {
            device.location = self.location;
        }
        if self.last_seen.is_some() {
            device.last_seen = self.last_seen;
        }
        if self.description.is_some() {
            device.description = self.description;
        }
    }
}

impl UpdateTag {
    pub fn apply(self, tag: &mut Tag) {
        if let Some(name) = self.name {
            tag.name = name;
        }
        if let Some(address) = self.address {
            tag.address = address;
        }
        if let Some(data_type) = self.data_type {
            tag.data_type = data_type;
        }
        if let Some(access) = self.access {
            tag.access = access;
        }
        if self.value.is_some() {
            tag.value = self.value;
        }
        if self.unit.is_some() {
            tag.unit = self.unit;
        }
    }
}

impl UpdateAlarm {
    pub fn apply(self, alarm: &mut Alarm) {
        if let Some(message) = self.message {
            alarm.message = message;
        }
        if let Some(severity) = self.severity {
            alarm.severity = severity;
        }
        if let Some(timestamp) = self.timestamp {
            alarm.timestamp = timestamp;
        }
        if let Some(acknowledged) = self.acknowledged {
            alarm.acknowledged = acknowledged;
        }
    }
}
