use std::fmt;

use serde::{Deserialize, Serialize};

/// Payment methods offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Upi,
    Credit,
    Debit,
    NetBanking,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Upi,
        PaymentMethod::Credit,
        PaymentMethod::Debit,
        PaymentMethod::NetBanking,
    ];

    /// Short code used in form fields and on the command line.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Upi => "upi",
            Self::Credit => "credit",
            Self::Debit => "debit",
            Self::NetBanking => "netbanking",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Upi => "UPI",
            Self::Credit => "Credit Card",
            Self::Debit => "Debit Card",
            Self::NetBanking => "Net Banking",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|method| method.code().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}
