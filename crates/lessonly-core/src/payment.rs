//! Payment-gateway return interpretation.
//!
//! After a redirect payment the gateway sends the browser back with the
//! result in the query string. The engine only interprets those fields for
//! display; processing the payment status is the gateway webhook's job,
//! outside this core.

use serde::{Deserialize, Serialize};

/// The query-string fields of a payment-gateway return redirect.
///
/// `Amount` is in integer minor units (e.g. kopecks); divide by 100 for
/// display. Absent or unparseable fields are `None` rather than errors —
/// a half-filled return page still renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReturn {
    /// Whether the gateway reported success (`Success=true`).
    pub success: bool,

    /// Gateway error code; `"0"` means no error.
    pub error_code: Option<String>,

    /// Paid amount in minor units.
    pub amount_minor: Option<i64>,

    /// The gateway's order reference.
    pub order_id: Option<String>,

    /// The gateway's payment reference.
    pub payment_id: Option<String>,

    /// Transaction timestamp as reported by the gateway.
    pub tran_date: Option<String>,
}

impl PaymentReturn {
    /// Parse gateway return parameters from query-string pairs.
    ///
    /// Unknown keys are ignored; keys are matched case-sensitively as the
    /// gateway sends them.
    pub fn from_query_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut parsed = Self::default();
        for (key, value) in pairs {
            match key {
                "Success" => parsed.success = value.eq_ignore_ascii_case("true"),
                "ErrorCode" => parsed.error_code = Some(value.to_string()),
                "Amount" => parsed.amount_minor = value.parse().ok(),
                "OrderId" => parsed.order_id = Some(value.to_string()),
                "PaymentId" => parsed.payment_id = Some(value.to_string()),
                "TranDate" => parsed.tran_date = Some(value.to_string()),
                _ => {}
            }
        }
        parsed
    }

    /// Whether the payment actually went through: the gateway flagged
    /// success and reported error code `"0"`.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.success && self.error_code.as_deref() == Some("0")
    }

    /// The paid amount formatted in major units ("340.00"), if present.
    #[must_use]
    pub fn amount_display(&self) -> Option<String> {
        self.amount_minor
            .map(|minor| format!("{}.{:02}", minor / 100, (minor % 100).abs()))
    }
}
