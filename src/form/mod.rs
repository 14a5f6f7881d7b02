//! Application form and live validity gate
//!
//! The form is a plain value bundle. [`evaluate`] recomputes the validity
//! flag from scratch on every call, so the result never depends on a
//! previous computation.

use std::fmt;
use std::path::{Path, PathBuf};

/// A form field, named after its multipart part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Applicant first name
    FirstName,
    /// Applicant last name
    LastName,
    /// Contact email
    Email,
    /// Gross annual income
    AnnualIncome,
    /// Requested principal
    LoanAmount,
    /// Bureau credit score
    CreditScore,
    /// 0 unemployed, 1 self-employed, 2 employed
    EmploymentStatus,
    /// 0 other, 1 rent, 2 own
    HousingStatus,
    /// Term in months
    LoanTerm,
}

impl Field {
    /// All fields in form order
    pub const ALL: [Self; 9] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::AnnualIncome,
        Self::LoanAmount,
        Self::CreditScore,
        Self::EmploymentStatus,
        Self::HousingStatus,
        Self::LoanTerm,
    ];

    const fn index(self) -> usize {
        match self {
            Self::FirstName => 0,
            Self::LastName => 1,
            Self::Email => 2,
            Self::AnnualIncome => 3,
            Self::LoanAmount => 4,
            Self::CreditScore => 5,
            Self::EmploymentStatus => 6,
            Self::HousingStatus => 7,
            Self::LoanTerm => 8,
        }
    }

    /// Multipart part name
    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::AnnualIncome => "annual_income",
            Self::LoanAmount => "loan_amount",
            Self::CreditScore => "credit_score",
            Self::EmploymentStatus => "employment_status",
            Self::HousingStatus => "housing_status",
            Self::LoanTerm => "loan_term",
        }
    }

    /// Prompt label
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Email => "Email",
            Self::AnnualIncome => "Annual income",
            Self::LoanAmount => "Loan amount",
            Self::CreditScore => "Credit score",
            Self::EmploymentStatus => "Employment status",
            Self::HousingStatus => "Housing status",
            Self::LoanTerm => "Loan term (months)",
        }
    }

    /// Whether the field must hold a number greater than zero
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::AnnualIncome | Self::LoanAmount | Self::CreditScore)
    }

    /// Fixed choices for select fields as `(value, label)` pairs
    pub const fn choices(self) -> Option<&'static [(&'static str, &'static str)]> {
        match self {
            Self::EmploymentStatus => Some(&[
                ("0", "Unemployed"),
                ("1", "Self-employed"),
                ("2", "Employed"),
            ]),
            Self::HousingStatus => Some(&[("0", "Other"), ("1", "Rent"), ("2", "Own")]),
            Self::LoanTerm => Some(&[("12", "12 months"), ("36", "36 months"), ("60", "60 months")]),
            _ => None,
        }
    }

    /// Look up a field by its part name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Optional document slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentSlot {
    /// Identity proof (PDF, PNG)
    IdentityDocument,
    /// Income proof (PDF, PNG)
    IncomeProof,
}

impl AttachmentSlot {
    /// Both slots in form order
    pub const ALL: [Self; 2] = [Self::IdentityDocument, Self::IncomeProof];

    const fn index(self) -> usize {
        match self {
            Self::IdentityDocument => 0,
            Self::IncomeProof => 1,
        }
    }

    /// Multipart part name
    pub const fn name(self) -> &'static str {
        match self {
            Self::IdentityDocument => "identity_document",
            Self::IncomeProof => "income_proof",
        }
    }
}

/// Current form values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationForm {
    values: [String; 9],
    attachments: [Option<PathBuf>; 2],
}

impl ApplicationForm {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a field value
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// Current value of a field (empty when unset)
    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    /// Attach a file to a slot, replacing any previous one
    pub fn attach(&mut self, slot: AttachmentSlot, path: impl Into<PathBuf>) {
        self.attachments[slot.index()] = Some(path.into());
    }

    /// File attached to a slot
    pub fn attachment(&self, slot: AttachmentSlot) -> Option<&Path> {
        self.attachments[slot.index()].as_deref()
    }

    /// `(part name, value)` pairs in form order
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        Field::ALL.into_iter().map(|f| (f.name(), self.get(f)))
    }

    /// Attached files with their slots
    pub fn attachments(&self) -> impl Iterator<Item = (AttachmentSlot, &Path)> {
        AttachmentSlot::ALL
            .into_iter()
            .filter_map(|slot| self.attachment(slot).map(|p| (slot, p)))
    }

    /// Clear every value and attachment
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Result of one validity computation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validity {
    /// Required fields that are empty
    pub missing: Vec<Field>,
    /// Numeric fields holding a value that is not a number `> 0`
    pub marked: Vec<Field>,
}

impl Validity {
    /// The form validity flag
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty() && self.marked.is_empty()
    }

    /// Whether a field carries the error marker
    pub fn is_marked(&self, field: Field) -> bool {
        self.marked.contains(&field)
    }

    /// Short description of what blocks submission
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            let names: Vec<&str> = self.missing.iter().map(|f| f.name()).collect();
            parts.push(format!("missing {}", names.join(", ")));
        }
        if !self.marked.is_empty() {
            let names: Vec<&str> = self.marked.iter().map(|f| f.name()).collect();
            parts.push(format!("must be greater than 0: {}", names.join(", ")));
        }
        parts.join("; ")
    }
}

/// Recompute form validity
///
/// Every field is required. Numeric fields must additionally parse as a
/// finite number greater than zero; a non-empty numeric value that does not
/// gets the error marker.
pub fn evaluate(form: &ApplicationForm) -> Validity {
    let mut validity = Validity::default();

    for field in Field::ALL {
        match check_value(field, form.get(field)) {
            Some(Problem::Missing) => validity.missing.push(field),
            Some(Problem::NotPositive) => validity.marked.push(field),
            None => {}
        }
    }

    validity
}

/// Why a single value fails the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    /// Empty after trimming
    Missing,
    /// Numeric field not holding a number `> 0`
    NotPositive,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "this field is required"),
            Self::NotPositive => write!(f, "must be a number greater than 0"),
        }
    }
}

/// Check one value against the rules of its field
pub fn check_value(field: Field, value: &str) -> Option<Problem> {
    let value = value.trim();
    if value.is_empty() {
        Some(Problem::Missing)
    } else if field.is_numeric() && !is_positive_number(value) {
        Some(Problem::NotPositive)
    } else {
        None
    }
}

fn is_positive_number(value: &str) -> bool {
    value
        .parse::<f64>()
        .is_ok_and(|n| n.is_finite() && n > 0.0)
}
