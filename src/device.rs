use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::TokenCountError;

/// Placement tag for a [`TokenCounts`](crate::TokenCounts) result.
///
/// Counting always runs on the host. The tag is carried along so downstream tensor code
/// knows where the counts are meant to live.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Device {
    #[default]
    Cpu,
    Cuda(usize),
    Metal(usize),
}

impl Device {
    pub fn is_cpu(&self) -> bool {
        matches!(self, Device::Cpu)
    }
}

impl FromStr for Device {
    type Err = TokenCountError;

    /// Accepts torch-style tags: `cpu`, `cuda`, `cuda:1`, `mps`, `metal:0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        let (kind, ordinal) = match tag.split_once(':') {
            Some((kind, ordinal)) => match ordinal.parse::<usize>() {
                Ok(ordinal) => (kind, ordinal),
                Err(_) => return Err(TokenCountError::UnknownDevice(s.to_string())),
            },
            None => (tag.as_str(), 0),
        };
        match kind {
            "cpu" if ordinal == 0 => Ok(Device::Cpu),
            "cuda" | "gpu" => Ok(Device::Cuda(ordinal)),
            "mps" | "metal" => Ok(Device::Metal(ordinal)),
            _ => Err(TokenCountError::UnknownDevice(s.to_string())),
        }
    }
}

impl TryFrom<String> for Device {
    type Error = TokenCountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Device> for String {
    fn from(value: Device) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda(ordinal) => write!(f, "cuda:{ordinal}"),
            Device::Metal(ordinal) => write!(f, "mps:{ordinal}"),
        }
    }
}
