use serde::{Deserialize, Serialize};

use crate::error::ListmergeError;
use crate::models::Record;

/// A text field that duplicate search can compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComparableField {
    FirstName,
    LastName,
    Address,
    City,
    State,
    ZipCode,
}

impl ComparableField {
    pub const ALL: [ComparableField; 6] = [
        Self::FirstName,
        Self::LastName,
        Self::Address,
        Self::City,
        Self::State,
        Self::ZipCode,
    ];

    /// Raw value of this field on `record`. Absent values are empty strings.
    pub fn value<'r>(&self, record: &'r Record) -> &'r str {
        match self {
            Self::FirstName => &record.first_name,
            Self::LastName => &record.last_name,
            Self::Address => &record.address,
            Self::City => &record.city,
            Self::State => &record.state,
            Self::ZipCode => &record.zip_code,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Address => "address",
            Self::City => "city",
            Self::State => "state",
            Self::ZipCode => "zipCode",
        }
    }
}

impl std::fmt::Display for ComparableField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComparableField {
    type Err = ListmergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "firstName" | "first_name" => Ok(Self::FirstName),
            "lastName" | "last_name" => Ok(Self::LastName),
            "address" => Ok(Self::Address),
            "city" => Ok(Self::City),
            "state" => Ok(Self::State),
            "zipCode" | "zip_code" | "zip" => Ok(Self::ZipCode),
            _ => Err(ListmergeError::InvalidField(s.to_string())),
        }
    }
}

/// Scalar fields reconciled when duplicates are merged into a primary record,
/// in reconciliation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MergeField {
    FirstName,
    LastName,
    Address,
    City,
    State,
    ZipCode,
    Status,
    CreatedDate,
    CreatedBy,
    ModifiedDate,
    ModifiedBy,
}

impl MergeField {
    pub const ALL: [MergeField; 11] = [
        Self::FirstName,
        Self::LastName,
        Self::Address,
        Self::City,
        Self::State,
        Self::ZipCode,
        Self::Status,
        Self::CreatedDate,
        Self::CreatedBy,
        Self::ModifiedDate,
        Self::ModifiedBy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Address => "address",
            Self::City => "city",
            Self::State => "state",
            Self::ZipCode => "zipCode",
            Self::Status => "status",
            Self::CreatedDate => "createdDate",
            Self::CreatedBy => "createdBy",
            Self::ModifiedDate => "modifiedDate",
            Self::ModifiedBy => "modifiedBy",
        }
    }
}

impl std::fmt::Display for MergeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
