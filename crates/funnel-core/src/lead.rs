//! Lead Model
//!
//! The editable draft behind the dialog and the submission sent to the relay.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FunnelError;

/// National prefix attached to every phone number sent to the provider
pub const COUNTRY_CODE: &str = "+39";

/// Business sector of the lead
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    #[serde(rename = "ecommerce")]
    Ecommerce,
    #[serde(rename = "servizi_locali")]
    LocalServices,
    #[serde(rename = "saas")]
    Saas,
    #[serde(rename = "info_prodotti")]
    InfoProducts,
    #[serde(rename = "altro")]
    Other,
}

impl Sector {
    /// Options in display order
    pub const ALL: [Self; 5] = [
        Self::Ecommerce,
        Self::LocalServices,
        Self::Saas,
        Self::InfoProducts,
        Self::Other,
    ];

    /// Wire value
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ecommerce => "ecommerce",
            Self::LocalServices => "servizi_locali",
            Self::Saas => "saas",
            Self::InfoProducts => "info_prodotti",
            Self::Other => "altro",
        }
    }

    /// Label shown in the select
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ecommerce => "E-commerce",
            Self::LocalServices => "Local services",
            Self::Saas => "SaaS",
            Self::InfoProducts => "Info products / Courses",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sector {
    type Err = FunnelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sector| sector.as_str() == s)
            .ok_or_else(|| FunnelError::UnknownSector(s.to_string()))
    }
}

/// Incentive picked on step 2
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bonus {
    #[serde(rename = "bonus_call")]
    CoachingCall,
    #[serde(rename = "bonus_ai_voice")]
    AiVoiceBooking,
    #[serde(rename = "bonus_ads")]
    AdsPack,
}

impl Bonus {
    pub const ALL: [Self; 3] = [Self::CoachingCall, Self::AiVoiceBooking, Self::AdsPack];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CoachingCall => "bonus_call",
            Self::AiVoiceBooking => "bonus_ai_voice",
            Self::AdsPack => "bonus_ads",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CoachingCall => "Advanced one-to-one coaching call",
            Self::AiVoiceBooking => "Using AI Voice to book appointments",
            Self::AdsPack => "300+ proven Meta ads, free",
        }
    }
}

/// Field values as the user is typing them
///
/// `phone` only ever holds digits (at most 10); the display form comes from
/// [`crate::format_phone`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LeadForm {
    pub company_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub sector: Option<Sector>,
    pub social_link: String,
}

impl LeadForm {
    /// Snapshot the draft as the relay payload
    pub fn to_submission(&self) -> LeadSubmission {
        LeadSubmission {
            company_name: self.company_name.trim().to_string(),
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.clone(),
            sector: self.sector,
            social_link: self.social_link.trim().to_string(),
        }
    }
}

/// Body of `POST /api/checkout`
///
/// The phone travels as national digits; the relay attaches [`COUNTRY_CODE`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    pub company_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<Sector>,
    #[serde(default)]
    pub social_link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_round_trips_through_wire_value() {
        for sector in Sector::ALL {
            assert_eq!(sector.as_str().parse::<Sector>().ok(), Some(sector));
        }
        assert!("crypto".parse::<Sector>().is_err());
    }

    #[test]
    fn test_submission_uses_camel_case_keys() {
        let form = LeadForm {
            company_name: "  Acme  ".into(),
            full_name: "Mario Rossi".into(),
            email: "mario@acme.it".into(),
            phone: "3331234567".into(),
            sector: Some(Sector::LocalServices),
            social_link: String::new(),
        };

        let json = serde_json::to_value(form.to_submission()).unwrap();
        assert_eq!(json["companyName"], "Acme");
        assert_eq!(json["fullName"], "Mario Rossi");
        assert_eq!(json["phone"], "3331234567");
        assert_eq!(json["sector"], "servizi_locali");
        assert_eq!(json["socialLink"], "");
    }

    #[test]
    fn test_unset_sector_is_omitted() {
        let json = serde_json::to_value(LeadForm::default().to_submission()).unwrap();
        assert!(json.get("sector").is_none());
    }
}
