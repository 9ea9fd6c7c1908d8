//! Backend service abstraction for the booking flow.
//!
//! The orchestrator's external calls go through this trait so tests can
//! substitute a stub for the HTTP client.

use async_trait::async_trait;

use lessonly_client::{
    ClientError, InvoiceDraft, InvoiceRecord, NewStudent, PaymentRequest, PaymentSession,
    SchoolClient, StudentRecord,
};
use lessonly_core::{CourseId, InvoiceId, UserId};

/// The external services the booking flow drives, in call order:
/// student creation, invoice creation, direct-payment policy, payment
/// initiation. Calls are strictly sequential — each depends on the previous
/// result.
#[async_trait]
pub trait BookingBackend: Send + Sync {
    /// Create a dependent-learner record owned by `owner`.
    async fn create_student(
        &self,
        owner: &UserId,
        student: NewStudent,
    ) -> Result<StudentRecord, ClientError>;

    /// Create an invoice from a fully computed draft.
    async fn create_invoice(&self, draft: &InvoiceDraft) -> Result<InvoiceRecord, ClientError>;

    /// Request a payment-redirect URL for an invoice.
    async fn create_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentSession, ClientError>;

    /// Whether this course/invoice combination may be paid immediately.
    async fn direct_payment_allowed(
        &self,
        course_id: &CourseId,
        invoice_id: &InvoiceId,
    ) -> Result<bool, ClientError>;
}

#[async_trait]
impl BookingBackend for SchoolClient {
    async fn create_student(
        &self,
        owner: &UserId,
        student: NewStudent,
    ) -> Result<StudentRecord, ClientError> {
        Self::create_student(self, owner, student).await
    }

    async fn create_invoice(&self, draft: &InvoiceDraft) -> Result<InvoiceRecord, ClientError> {
        Self::create_invoice(self, draft).await
    }

    async fn create_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentSession, ClientError> {
        Self::create_payment(self, request).await
    }

    async fn direct_payment_allowed(
        &self,
        course_id: &CourseId,
        invoice_id: &InvoiceId,
    ) -> Result<bool, ClientError> {
        Self::direct_payment_allowed(self, course_id, invoice_id).await
    }
}
