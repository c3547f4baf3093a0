//! Record models shared by the registration forms and the admin reports

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discriminator between the two person-record tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    Enrollee,
    Staff,
}

impl RecordKind {
    /// Table holding records of this kind
    pub fn table_name(&self) -> &'static str {
        match self {
            RecordKind::Enrollee => "enrollees",
            RecordKind::Staff => "staff",
        }
    }

    /// Display label used in surface messages
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Enrollee => "Enrollee",
            RecordKind::Staff => "Staff",
        }
    }
}

/// Year level for enrollee records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Year {
    First,
    Second,
    Third,
    Fourth,
}

impl Year {
    pub const ALL: [Year; 4] = [Year::First, Year::Second, Year::Third, Year::Fourth];

    /// Canonical display string, also the stored column value
    pub fn as_str(&self) -> &'static str {
        match self {
            Year::First => "1st Year",
            Year::Second => "2nd Year",
            Year::Third => "3rd Year",
            Year::Fourth => "4th Year",
        }
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Year {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Year::ALL
            .into_iter()
            .find(|y| y.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown year level: {}", s)))
    }
}

/// Offered programs (closed list, stored by display string)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Program {
    Accountancy,
    AccountingInformationSystem,
    CivilEngineering,
    ComputerEngineering,
    Criminology,
    HospitalityManagement,
    TourismManagement,
    InformationTechnology,
    ComputerScience,
    Psychology,
    BusinessAdministrationFinancialManagement,
    BusinessAdministrationMarketingManagement,
    BusinessAdministrationHumanResourcesManagement,
    BusinessAdministrationOperationsManagement,
    ElementaryEducation,
    SecondaryEducationEnglish,
    SecondaryEducationMathematics,
    SecondaryEducationScience,
    SecondaryEducationFilipino,
    AssociateComputerTechnology,
}

impl Program {
    pub const ALL: [Program; 20] = [
        Program::Accountancy,
        Program::AccountingInformationSystem,
        Program::CivilEngineering,
        Program::ComputerEngineering,
        Program::Criminology,
        Program::HospitalityManagement,
        Program::TourismManagement,
        Program::InformationTechnology,
        Program::ComputerScience,
        Program::Psychology,
        Program::BusinessAdministrationFinancialManagement,
        Program::BusinessAdministrationMarketingManagement,
        Program::BusinessAdministrationHumanResourcesManagement,
        Program::BusinessAdministrationOperationsManagement,
        Program::ElementaryEducation,
        Program::SecondaryEducationEnglish,
        Program::SecondaryEducationMathematics,
        Program::SecondaryEducationScience,
        Program::SecondaryEducationFilipino,
        Program::AssociateComputerTechnology,
    ];

    /// Canonical display string, also the stored column value
    pub fn as_str(&self) -> &'static str {
        match self {
            Program::Accountancy => "Bachelor of Science in Accountancy",
            Program::AccountingInformationSystem => {
                "Bachelor of Science in Accounting Information System"
            }
            Program::CivilEngineering => "Bachelor of Science in Civil Engineering",
            Program::ComputerEngineering => "Bachelor of Science in Computer Engineering",
            Program::Criminology => "Bachelor of Science in Criminology",
            Program::HospitalityManagement => "Bachelor of Science in Hospitality Management",
            Program::TourismManagement => "Bachelor of Science in Tourism Management",
            Program::InformationTechnology => "Bachelor of Science in Information Technology",
            Program::ComputerScience => "Bachelor of Science in Computer Science",
            Program::Psychology => "Bachelor of Science in Psychology",
            Program::BusinessAdministrationFinancialManagement => {
                "Bachelor of Science in Business Administration - Major in Financial Management"
            }
            Program::BusinessAdministrationMarketingManagement => {
                "Bachelor of Science in Business Administration - Major in Marketing Management"
            }
            Program::BusinessAdministrationHumanResourcesManagement => {
                "Bachelor of Science in Business Administration - Major in Human Resources Management"
            }
            Program::BusinessAdministrationOperationsManagement => {
                "Bachelor of Science in Business Administration - Major in Operations Management"
            }
            Program::ElementaryEducation => "Bachelor of Elementary Education",
            Program::SecondaryEducationEnglish => {
                "Bachelor of Secondary Education - Major in English"
            }
            Program::SecondaryEducationMathematics => {
                "Bachelor of Secondary Education - Major in Mathematics"
            }
            Program::SecondaryEducationScience => {
                "Bachelor of Secondary Education - Major in Science"
            }
            Program::SecondaryEducationFilipino => {
                "Bachelor of Secondary Education - Major in Filipino"
            }
            Program::AssociateComputerTechnology => "Associate in Computer Technology",
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Program {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Program::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown program: {}", s)))
    }
}

/// Fields shared by both record kinds
///
/// The address is never stored as its three parts; it is recomputed from
/// barangay/town/province when the record is persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommonFields {
    pub surname: String,
    pub given_name: String,
    pub middle_initial: String,
    /// Name extension (Jr., III, ...) - the only optional field
    pub extension: String,
    pub barangay: String,
    pub town: String,
    pub province: String,
    pub emergency_name: String,
    pub emergency_relation: String,
    /// Exactly 11 decimal digits once validated
    pub emergency_contact: String,
}

impl CommonFields {
    /// Composite address: barangay, town, province
    pub fn address(&self) -> String {
        format!("{}, {}, {}", self.barangay, self.town, self.province)
    }

    fn trimmed(&self) -> CommonFields {
        CommonFields {
            surname: self.surname.trim().to_string(),
            given_name: self.given_name.trim().to_string(),
            middle_initial: self.middle_initial.trim().to_string(),
            extension: self.extension.trim().to_string(),
            barangay: self.barangay.trim().to_string(),
            town: self.town.trim().to_string(),
            province: self.province.trim().to_string(),
            emergency_name: self.emergency_name.trim().to_string(),
            emergency_relation: self.emergency_relation.trim().to_string(),
            emergency_contact: self.emergency_contact.trim().to_string(),
        }
    }
}

/// Kind-specific record fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum KindDetail {
    Enrollee { year: Year, program: Program },
    Staff { department: String, position: String },
}

/// A complete person record as captured by a registration form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Caller-supplied unique key within the kind's table
    pub record_id: String,
    pub common: CommonFields,
    pub detail: KindDetail,
}

impl PersonRecord {
    pub fn kind(&self) -> RecordKind {
        match self.detail {
            KindDetail::Enrollee { .. } => RecordKind::Enrollee,
            KindDetail::Staff { .. } => RecordKind::Staff,
        }
    }

    /// Copy with every textual field trimmed, applied before validation
    pub fn trimmed(&self) -> PersonRecord {
        let detail = match &self.detail {
            KindDetail::Enrollee { year, program } => KindDetail::Enrollee {
                year: *year,
                program: *program,
            },
            KindDetail::Staff {
                department,
                position,
            } => KindDetail::Staff {
                department: department.trim().to_string(),
                position: position.trim().to_string(),
            },
        };
        PersonRecord {
            record_id: self.record_id.trim().to_string(),
            common: self.common.trimmed(),
            detail,
        }
    }

    /// Labels of every required field that is empty (extension excluded)
    pub fn missing_fields(&self) -> Vec<String> {
        let c = &self.common;
        let mut required: Vec<(&str, &str)> = vec![
            ("Surname", c.surname.as_str()),
            ("Given Name", c.given_name.as_str()),
            ("Middle Initial", c.middle_initial.as_str()),
            ("Barangay", c.barangay.as_str()),
            ("Town/Municipality", c.town.as_str()),
            ("Province", c.province.as_str()),
            ("Record ID", self.record_id.as_str()),
        ];
        if let KindDetail::Staff {
            department,
            position,
        } = &self.detail
        {
            required.push(("Department", department.as_str()));
            required.push(("Position", position.as_str()));
        }
        required.push(("Emergency Contact Name", c.emergency_name.as_str()));
        required.push(("Emergency Relation", c.emergency_relation.as_str()));
        required.push(("Emergency Contact Number", c.emergency_contact.as_str()));

        required
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(label, _)| label.to_string())
            .collect()
    }
}
