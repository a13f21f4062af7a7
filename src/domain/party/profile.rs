//! Party profile - the marketplace account behind a proposal participant.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{UserId, ValidationError};

/// Kind of marketplace account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PartyKind {
    Local,
    #[default]
    Tourist,
    Vendor,
    TourOperator,
}

impl PartyKind {
    /// Stable storage code.
    pub fn as_str(&self) -> &'static str {
        match self {
            PartyKind::Local => "local",
            PartyKind::Tourist => "tourist",
            PartyKind::Vendor => "vendor",
            PartyKind::TourOperator => "tour_operator",
        }
    }

    /// Parses a storage code.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "local" => Ok(PartyKind::Local),
            "tourist" => Ok(PartyKind::Tourist),
            "vendor" => Ok(PartyKind::Vendor),
            "tour_operator" => Ok(PartyKind::TourOperator),
            other => Err(ValidationError::invalid_format(
                "party_kind",
                format!("unknown party kind '{}'", other),
            )),
        }
    }

    /// Vendors and tour operators are the businesses that negotiate proposals.
    pub fn is_business(&self) -> bool {
        matches!(self, PartyKind::Vendor | PartyKind::TourOperator)
    }
}

impl fmt::Display for PartyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PartyKind::Local => "Local Resident",
            PartyKind::Tourist => "Tourist",
            PartyKind::Vendor => "F&B Vendor",
            PartyKind::TourOperator => "Tour Operator",
        };
        write!(f, "{}", s)
    }
}

/// Read model of a marketplace account, used to address notices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyProfile {
    pub user_id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub kind: PartyKind,
    /// Vendor business name or tour operator company name.
    pub business_name: Option<String>,
}

impl PartyProfile {
    /// Full name, falling back to the email when no name is on file.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }

    /// Business name when set and non-blank.
    pub fn business(&self) -> Option<&str> {
        self.business_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(first: &str, last: &str, business: Option<&str>) -> PartyProfile {
        PartyProfile {
            user_id: UserId::new("op-1").unwrap(),
            email: "tours@example.sg".to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            kind: PartyKind::TourOperator,
            business_name: business.map(str::to_string),
        }
    }

    #[test]
    fn display_name_joins_first_and_last() {
        assert_eq!(profile("Mei", "Tan", None).display_name(), "Mei Tan");
    }

    #[test]
    fn display_name_falls_back_to_email() {
        assert_eq!(profile("", " ", None).display_name(), "tours@example.sg");
    }

    #[test]
    fn display_name_with_only_first_name() {
        assert_eq!(profile("Mei", "", None).display_name(), "Mei");
    }

    #[test]
    fn blank_business_name_is_ignored() {
        assert_eq!(profile("Mei", "Tan", Some("  ")).business(), None);
        assert_eq!(
            profile("Mei", "Tan", Some("Hawker Trails")).business(),
            Some("Hawker Trails")
        );
    }

    #[test]
    fn party_kind_round_trips_through_storage_code() {
        for kind in [
            PartyKind::Local,
            PartyKind::Tourist,
            PartyKind::Vendor,
            PartyKind::TourOperator,
        ] {
            assert_eq!(PartyKind::parse(kind.as_str()).unwrap(), kind);
        }
        assert!(PartyKind::parse("admin").is_err());
    }

    #[test]
    fn only_vendors_and_operators_are_businesses() {
        assert!(PartyKind::Vendor.is_business());
        assert!(PartyKind::TourOperator.is_business());
        assert!(!PartyKind::Tourist.is_business());
    }
}
