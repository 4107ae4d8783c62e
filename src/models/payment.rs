//! Payment flags and the status derived from them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PayrollError;

/// Which of the two independent payment flags an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentField {
    /// The cash-in-hand portion.
    Hand,
    /// The bank-transfer portion.
    Bank,
}

impl FromStr for PaymentField {
    type Err = PayrollError;

    /// Accepts the short names and both stored spellings of each flag.
    ///
    /// ```
    /// use payroll_engine::models::PaymentField;
    ///
    /// assert_eq!("isPaidHand".parse::<PaymentField>().unwrap(), PaymentField::Hand);
    /// assert_eq!("is_paid_bank".parse::<PaymentField>().unwrap(), PaymentField::Bank);
    /// assert!("is_paid_cash".parse::<PaymentField>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hand" | "is_paid_hand" | "isPaidHand" => Ok(PaymentField::Hand),
            "bank" | "is_paid_bank" | "isPaidBank" => Ok(PaymentField::Bank),
            other => Err(PayrollError::InvalidField {
                field: other.to_string(),
            }),
        }
    }
}

/// Free-form payment metadata attached when a flag is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// How the payment was made, e.g. "cash" or "transfer".
    #[serde(default)]
    pub method: Option<String>,
    /// An external reference such as a transfer id.
    #[serde(default)]
    pub reference: Option<String>,
}

/// Composite status derived from the hand and bank flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Neither portion has been paid.
    Pending,
    /// Only the hand portion has been paid.
    HandPaid,
    /// Only the bank portion has been paid.
    BankPaid,
    /// Both portions have been paid.
    Paid,
}

impl PaymentStatus {
    /// Derives the status from the two flags.
    pub fn from_flags(is_paid_hand: bool, is_paid_bank: bool) -> Self {
        match (is_paid_hand, is_paid_bank) {
            (true, true) => PaymentStatus::Paid,
            (true, false) => PaymentStatus::HandPaid,
            (false, true) => PaymentStatus::BankPaid,
            (false, false) => PaymentStatus::Pending,
        }
    }

    /// The label used in exports.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::HandPaid => "Hand Paid",
            PaymentStatus::BankPaid => "Bank Paid",
            PaymentStatus::Paid => "Paid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
