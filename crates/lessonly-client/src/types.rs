//! Request and response types for the content-store and payment APIs.
//!
//! The remote API speaks camelCase JSON; every wire struct carries
//! `#[serde(rename_all = "camelCase")]` so the Rust side stays snake_case.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lessonly_core::{
    BookingId, Course, CourseId, InvoiceId, RecurrencePattern, StudentId, UserId, WeekdaySet,
};

/// A course as returned by the content store.
///
/// `startDate`/`endDate` sometimes arrive as full datetimes; they are
/// normalized to date-only on deserialization so range comparisons cannot
/// pick up off-by-one errors from a stray time-of-day component.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    /// Content-store id.
    pub id: CourseId,
    /// Display name.
    pub name: String,
    /// Weekdays the course meets on.
    pub weekdays: WeekdaySet,
    /// Price of one lesson in minor units.
    pub price_per_lesson: i64,
    /// ISO currency code.
    pub currency: String,
    /// First active day.
    #[serde(deserialize_with = "date_only")]
    pub start_date: NaiveDate,
    /// Last active day (inclusive).
    #[serde(deserialize_with = "date_only")]
    pub end_date: NaiveDate,
    /// IANA timezone of the course's lesson times.
    pub timezone: String,
    /// Minimum group size.
    pub min_students: u32,
    /// Maximum group size.
    pub max_students: u32,
}

impl From<CourseRecord> for Course {
    fn from(record: CourseRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            pattern: RecurrencePattern::new(record.weekdays, record.start_date, record.end_date),
            price_per_lesson_minor: record.price_per_lesson,
            currency: record.currency,
            timezone: record.timezone,
            min_students: record.min_students,
            max_students: record.max_students,
        }
    }
}

/// Referral-code validation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralValidationRequest {
    /// The referral code entered by the user.
    pub code: String,
    /// The course price the discount would apply to, in minor units.
    pub course_price: i64,
}

/// Referral-code validation result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralValidation {
    /// Whether the code is valid for this course price.
    pub is_valid: bool,
    /// Pre-computed discount amount in minor units.
    pub discount_amount: i64,
    /// The discount percentage behind the amount.
    pub discount_percentage: i64,
    /// Rejection reason when `is_valid` is false.
    #[serde(default)]
    pub error: Option<String>,
}

/// A dependent learner to create in the content store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    /// Given name.
    pub name: String,
    /// Family name.
    pub family: String,
    /// Birth date; the store calls this field "age" but carries an ISO date.
    #[serde(rename = "age")]
    pub birth_date: NaiveDate,
}

/// Student-creation request, tying the learner to the owning account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    /// The learner's details.
    #[serde(flatten)]
    pub student: NewStudent,
    /// The account that owns the learner record.
    pub owner: UserId,
}

/// A persisted dependent-learner record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    /// Content-store id.
    pub id: StudentId,
    /// Given name.
    pub name: String,
    /// Family name.
    pub family: String,
    /// Birth date (the store's "age" field).
    #[serde(rename = "age")]
    pub birth_date: NaiveDate,
}

/// Invoice-creation request.
///
/// `sum` must equal `max(0, originalSum - discountAmount - bonusesUsed)`;
/// `startDate`/`endDate` are the first and last lesson dates of the paid
/// window, not calendar month bounds. `bookingId` is a client-generated
/// idempotency key: a retried request for the same booking intent must not
/// create a second invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    /// Learner's given name.
    pub name: String,
    /// Learner's family name.
    pub family: String,
    /// Final payable amount in minor units.
    pub sum: i64,
    /// Pre-discount amount in minor units.
    pub original_sum: i64,
    /// Referral discount in minor units.
    pub discount_amount: i64,
    /// Wallet bonuses debited in minor units.
    pub bonuses_used: i64,
    /// ISO currency code.
    pub currency: String,
    /// First lesson date in the paid window.
    pub start_date: NaiveDate,
    /// Last lesson date in the paid window.
    pub end_date: NaiveDate,
    /// Always false at creation; flipped by payment callbacks externally.
    pub status_payment: bool,
    /// The booked course.
    pub course: CourseId,
    /// The paying account.
    pub owner: UserId,
    /// Referral code applied, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
    /// The referring user, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    /// Idempotency key for this booking intent.
    pub booking_id: BookingId,
}

/// A persisted invoice echoed back by the content store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    /// Content-store id.
    pub id: InvoiceId,
    /// Final payable amount in minor units.
    pub sum: i64,
    /// Pre-discount amount in minor units.
    pub original_sum: i64,
    /// Referral discount in minor units.
    pub discount_amount: i64,
    /// Wallet bonuses debited in minor units.
    pub bonuses_used: i64,
    /// ISO currency code.
    pub currency: String,
    /// First lesson date in the paid window.
    pub start_date: NaiveDate,
    /// Last lesson date in the paid window.
    pub end_date: NaiveDate,
    /// Payment status; false until the gateway confirms.
    pub status_payment: bool,
}

/// Payment-initiation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// The paying user.
    pub user: UserId,
    /// The booked course.
    pub course: CourseId,
    /// Amount to charge in minor units.
    pub amount: i64,
    /// ISO currency code.
    pub currency: String,
    /// The invoice being paid.
    pub invoice_id: InvoiceId,
}

/// Payment-initiation response: the redirect target.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSession {
    /// The gateway URL to redirect the browser to.
    pub payment_url: String,
}

/// Direct-payment policy response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectPaymentPolicy {
    /// Whether the invoice may be paid immediately via redirect.
    pub allowed: bool,
}

/// Structured error body returned by the API.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    /// The error payload.
    pub error: ApiErrorBody,
}

/// The error payload of an [`ApiErrorResponse`].
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// Deserialize a date that may arrive as `"2025-01-01"`,
/// `"2025-01-01T10:30:00"` or an RFC 3339 timestamp, keeping only the
/// calendar date.
fn date_only<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error as _;

    let raw = String::deserialize(deserializer)?;
    parse_date_only(&raw).ok_or_else(|| D::Error::custom(format!("unrecognized date: {raw}")))
}

fn parse_date_only(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return Some(date);
    }
    if let Ok(datetime) = raw.parse::<chrono::NaiveDateTime>() {
        return Some(datetime.date());
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|datetime| datetime.date_naive())
}
