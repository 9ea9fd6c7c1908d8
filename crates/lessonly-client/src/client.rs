//! HTTP client implementation for the content store and payment service.

use reqwest::Client;
use std::time::Duration;

use lessonly_core::{Course, CourseId, InvoiceId, UserId};

use crate::error::ClientError;
use crate::types::{
    ApiErrorResponse, CourseRecord, CreateStudentRequest, DirectPaymentPolicy, InvoiceDraft,
    InvoiceRecord, NewStudent, PaymentRequest, PaymentSession, ReferralValidation,
    ReferralValidationRequest, StudentRecord,
};

/// Client for the remote content store and the payment service.
///
/// Authentication is out of the engine's scope: the host application hands
/// in an already-established bearer token.
#[derive(Debug, Clone)]
pub struct SchoolClient {
    client: Client,
    base_url: String,
    auth_token: String,
}

impl SchoolClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the API (e.g. `"https://api.lessonly.app"`)
    /// * `auth_token` - Bearer token for the current session
    #[must_use]
    pub fn new(base_url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self::with_options(base_url, auth_token, ClientOptions::default())
    }

    /// Create a new client with custom options.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with
    /// default settings).
    #[must_use]
    pub fn with_options(
        base_url: impl Into<String>,
        auth_token: impl Into<String>,
        options: ClientOptions,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: auth_token.into(),
        }
    }

    /// Fetch a course by id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::CourseNotFound`] for an unknown id, or another
    /// error if the request fails.
    pub async fn fetch_course(&self, course_id: &CourseId) -> Result<Course, ClientError> {
        let url = format!("{}/api/courses/{course_id}", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.auth_token)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::CourseNotFound {
                course_id: course_id.to_string(),
            });
        }

        let record: CourseRecord = self.handle_response(response).await?;
        Ok(record.into())
    }

    /// Validate a referral code against a course price.
    ///
    /// The service computes the discount amount; the engine re-validates it
    /// before use but treats it as opaque otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn validate_referral(
        &self,
        code: impl Into<String>,
        course_price_minor: i64,
    ) -> Result<ReferralValidation, ClientError> {
        let url = format!("{}/api/referrals/validate", self.base_url);
        let request = ReferralValidationRequest {
            code: code.into(),
            course_price: course_price_minor,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.auth_token)
            .json(&request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Create a dependent-learner record owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn create_student(
        &self,
        owner: &UserId,
        student: NewStudent,
    ) -> Result<StudentRecord, ClientError> {
        let url = format!("{}/api/students", self.base_url);
        let request = CreateStudentRequest {
            student,
            owner: owner.clone(),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.auth_token)
            .json(&request)
            .send()
            .await?;

        let record: StudentRecord = self.handle_response(response).await?;
        tracing::debug!(student_id = %record.id, "created student");
        Ok(record)
    }

    /// Create an invoice.
    ///
    /// The draft carries a `bookingId` idempotency key, so retrying this
    /// call for the same booking intent cannot create a second invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn create_invoice(&self, draft: &InvoiceDraft) -> Result<InvoiceRecord, ClientError> {
        let url = format!("{}/api/invoices", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.auth_token)
            .json(draft)
            .send()
            .await?;

        let record: InvoiceRecord = self.handle_response(response).await?;
        tracing::info!(invoice_id = %record.id, sum = record.sum, "created invoice");
        Ok(record)
    }

    /// Request a payment-redirect URL for an invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn create_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentSession, ClientError> {
        let url = format!("{}/api/payments", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.auth_token)
            .json(request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Ask the policy service whether this course/invoice combination may be
    /// paid immediately via redirect.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn direct_payment_allowed(
        &self,
        course_id: &CourseId,
        invoice_id: &InvoiceId,
    ) -> Result<bool, ClientError> {
        let url = format!(
            "{}/api/payments/direct-allowed?course={course_id}&invoice={invoice_id}",
            self.base_url
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.auth_token)
            .send()
            .await?;

        let policy: DirectPaymentPolicy = self.handle_response(response).await?;
        Ok(policy.allowed)
    }

    /// Handle an API response and convert error bodies to typed errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let error_body: Result<ApiErrorResponse, _> = response.json().await;
        match error_body {
            Ok(api_error) => Err(ClientError::Api {
                code: api_error.error.code,
                message: api_error.error.message,
                status: status.as_u16(),
            }),
            Err(_) => Err(ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}
