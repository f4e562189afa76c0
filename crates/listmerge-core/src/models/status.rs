use serde::{Deserialize, Serialize};

use crate::error::ListmergeError;

/// Mailing classification of a contact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordStatus {
    #[default]
    Active,
    DoNotContact,
    ReturnedMail,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::DoNotContact => "do-not-contact",
            Self::ReturnedMail => "returned-mail",
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RecordStatus {
    type Err = ListmergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "do-not-contact" => Ok(Self::DoNotContact),
            "returned-mail" => Ok(Self::ReturnedMail),
            _ => Err(ListmergeError::InvalidStatus(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_and_display() {
        let status: RecordStatus = "do-not-contact".parse().unwrap();
        assert_eq!(status, RecordStatus::DoNotContact);
        assert_eq!(status.to_string(), "do-not-contact");
        assert!("unknown".parse::<RecordStatus>().is_err());
    }

    #[test]
    fn test_status_serde_kebab_case() {
        let json = serde_json::to_string(&RecordStatus::ReturnedMail).unwrap();
        assert_eq!(json, "\"returned-mail\"");
    }
}
