//! Integration tests for the API client against a mock server.

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lessonly_client::{ClientError, InvoiceDraft, NewStudent, PaymentRequest, SchoolClient};
use lessonly_core::{BookingId, CourseId, InvoiceId, UserId};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_draft() -> InvoiceDraft {
    InvoiceDraft {
        name: "Anna".into(),
        family: "Petrova".into(),
        sum: 3400,
        original_sum: 6000,
        discount_amount: 600,
        bonuses_used: 2000,
        currency: "RUB".into(),
        start_date: date(2025, 1, 20),
        end_date: date(2025, 1, 31),
        status_payment: false,
        course: CourseId::new("course-1"),
        owner: UserId::new("user-1"),
        referral_code: Some("FRIEND10".into()),
        referrer: Some("user-7".into()),
        booking_id: BookingId::generate(),
    }
}

#[tokio::test]
async fn fetch_course_maps_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/courses/course-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "course-1",
            "name": "Watercolor basics",
            "weekdays": ["monday", "wednesday", "friday"],
            "pricePerLesson": 1000,
            "currency": "RUB",
            "startDate": "2025-01-01T09:30:00",
            "endDate": "2025-03-31",
            "timezone": "Europe/Moscow",
            "minStudents": 1,
            "maxStudents": 8
        })))
        .mount(&server)
        .await;

    let client = SchoolClient::new(server.uri(), "token");
    let course = client
        .fetch_course(&CourseId::new("course-1"))
        .await
        .unwrap();

    assert_eq!(course.name, "Watercolor basics");
    assert_eq!(course.price_per_lesson_minor, 1000);
    // Datetime bound normalized to date-only.
    assert_eq!(course.pattern.start_date, date(2025, 1, 1));
    assert_eq!(course.pattern.end_date, date(2025, 3, 31));
}

#[tokio::test]
async fn fetch_course_unknown_id_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/courses/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = SchoolClient::new(server.uri(), "token");
    let result = client.fetch_course(&CourseId::new("missing")).await;

    assert!(matches!(
        result,
        Err(ClientError::CourseNotFound { course_id }) if course_id == "missing"
    ));
}

#[tokio::test]
async fn create_invoice_sends_camel_case_payload() {
    let server = MockServer::start().await;
    let draft = sample_draft();

    Mock::given(method("POST"))
        .and(path("/api/invoices"))
        .and(body_partial_json(json!({
            "sum": 3400,
            "originalSum": 6000,
            "discountAmount": 600,
            "bonusesUsed": 2000,
            "statusPayment": false,
            "startDate": "2025-01-20",
            "endDate": "2025-01-31",
            "referralCode": "FRIEND10",
            "bookingId": draft.booking_id,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "inv-1",
            "sum": 3400,
            "originalSum": 6000,
            "discountAmount": 600,
            "bonusesUsed": 2000,
            "currency": "RUB",
            "startDate": "2025-01-20",
            "endDate": "2025-01-31",
            "statusPayment": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SchoolClient::new(server.uri(), "token");
    let invoice = client.create_invoice(&draft).await.unwrap();

    assert_eq!(invoice.id, InvoiceId::new("inv-1"));
    assert_eq!(invoice.sum, 3400);
    assert!(!invoice.status_payment);
}

#[tokio::test]
async fn validate_referral_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/referrals/validate"))
        .and(body_partial_json(json!({
            "code": "FRIEND10",
            "coursePrice": 6000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isValid": true,
            "discountAmount": 600,
            "discountPercentage": 10
        })))
        .mount(&server)
        .await;

    let client = SchoolClient::new(server.uri(), "token");
    let validation = client.validate_referral("FRIEND10", 6000).await.unwrap();

    assert!(validation.is_valid);
    assert_eq!(validation.discount_amount, 600);
    assert_eq!(validation.discount_percentage, 10);
}

#[tokio::test]
async fn create_student_posts_owner_and_age() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/students"))
        .and(body_partial_json(json!({
            "name": "Ivan",
            "family": "Petrov",
            "age": "2015-06-01",
            "owner": "user-1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "stu-5",
            "name": "Ivan",
            "family": "Petrov",
            "age": "2015-06-01"
        })))
        .mount(&server)
        .await;

    let client = SchoolClient::new(server.uri(), "token");
    let student = client
        .create_student(
            &UserId::new("user-1"),
            NewStudent {
                name: "Ivan".into(),
                family: "Petrov".into(),
                birth_date: date(2015, 6, 1),
            },
        )
        .await
        .unwrap();

    assert_eq!(student.id.as_str(), "stu-5");
    assert_eq!(student.birth_date, date(2015, 6, 1));
}

#[tokio::test]
async fn create_payment_returns_redirect_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/payments"))
        .and(body_partial_json(json!({
            "user": "user-1",
            "course": "course-1",
            "amount": 3400,
            "currency": "RUB",
            "invoiceId": "inv-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "paymentUrl": "https://pay.example/redirect/abc"
        })))
        .mount(&server)
        .await;

    let client = SchoolClient::new(server.uri(), "token");
    let session = client
        .create_payment(&PaymentRequest {
            user: UserId::new("user-1"),
            course: CourseId::new("course-1"),
            amount: 3400,
            currency: "RUB".into(),
            invoice_id: InvoiceId::new("inv-1"),
        })
        .await
        .unwrap();

    assert_eq!(session.payment_url, "https://pay.example/redirect/abc");
}

#[tokio::test]
async fn direct_payment_policy_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/payments/direct-allowed"))
        .and(query_param("course", "course-1"))
        .and(query_param("invoice", "inv-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "allowed": true })))
        .mount(&server)
        .await;

    let client = SchoolClient::new(server.uri(), "token");
    let allowed = client
        .direct_payment_allowed(&CourseId::new("course-1"), &InvoiceId::new("inv-1"))
        .await
        .unwrap();

    assert!(allowed);
}

#[tokio::test]
async fn structured_error_body_becomes_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/invoices"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "error": { "code": "validation_failed", "message": "sum mismatch" }
        })))
        .mount(&server)
        .await;

    let client = SchoolClient::new(server.uri(), "token");
    let result = client.create_invoice(&sample_draft()).await;

    match result {
        Err(ClientError::Api {
            code,
            message,
            status,
        }) => {
            assert_eq!(code, "validation_failed");
            assert_eq!(message, "sum mismatch");
            assert_eq!(status, 422);
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn unstructured_error_body_becomes_unknown_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/referrals/validate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = SchoolClient::new(server.uri(), "token");
    let result = client.validate_referral("X", 100).await;

    assert!(matches!(
        result,
        Err(ClientError::Api { code, status: 500, .. }) if code == "unknown"
    ));
}
