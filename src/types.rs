use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sequential identifier handed out from the `next_policy_number` counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyNumber(pub u64);

impl PolicyNumber {
    pub fn next(self) -> Self {
        PolicyNumber(self.0 + 1)
    }
}

impl fmt::Display for PolicyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canadian provinces and territories accepted on a policy address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Province {
    AB,
    BC,
    MB,
    NB,
    NL,
    NS,
    NT,
    NU,
    ON,
    PE,
    QC,
    SK,
    YT,
}

impl Province {
    pub const ALL: [Province; 13] = [
        Province::AB,
        Province::BC,
        Province::MB,
        Province::NB,
        Province::NL,
        Province::NS,
        Province::NT,
        Province::NU,
        Province::ON,
        Province::PE,
        Province::QC,
        Province::SK,
        Province::YT,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Province::AB => "AB",
            Province::BC => "BC",
            Province::MB => "MB",
            Province::NB => "NB",
            Province::NL => "NL",
            Province::NS => "NS",
            Province::NT => "NT",
            Province::NU => "NU",
            Province::ON => "ON",
            Province::PE => "PE",
            Province::QC => "QC",
            Province::SK => "SK",
            Province::YT => "YT",
        }
    }
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Province {
    type Err = UnknownCode;

    /// Case-insensitive; surrounding whitespace is not trimmed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Province::ALL
            .into_iter()
            .find(|p| p.code() == upper)
            .ok_or_else(|| UnknownCode(s.to_string()))
    }
}

/// How the customer settles the policy. Anything other than `Full` is paid
/// in installments after the processing fee is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "FULL")]
    Full,
    #[serde(rename = "MONTHLY")]
    Monthly,
    #[serde(rename = "DOWN PAY")]
    DownPay,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] =
        [PaymentMethod::Full, PaymentMethod::Monthly, PaymentMethod::DownPay];

    /// Upper-case wire form, as stored in the policy log.
    pub fn code(self) -> &'static str {
        match self {
            PaymentMethod::Full => "FULL",
            PaymentMethod::Monthly => "MONTHLY",
            PaymentMethod::DownPay => "DOWN PAY",
        }
    }

    /// Title-cased form used on the receipt.
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Full => "Full",
            PaymentMethod::Monthly => "Monthly",
            PaymentMethod::DownPay => "Down Pay",
        }
    }

    pub fn is_installment(self) -> bool {
        !matches!(self, PaymentMethod::Full)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.code() == upper)
            .ok_or_else(|| UnknownCode(s.to_string()))
    }
}

/// Rejected free-text code (province or payment method).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised code {0:?}")]
pub struct UnknownCode(pub String);
