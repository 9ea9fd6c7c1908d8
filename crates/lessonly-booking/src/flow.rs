//! The booking flow state machine.
//!
//! A booking walks `auth → contact → student → confirmation → success`,
//! collecting inputs step by step and producing exactly one invoice at
//! confirmation. The session lives in memory only; abandoning it before
//! confirmation leaves no side effects anywhere, and abandoning it after
//! invoice creation leaves an unpaid invoice, which is a recoverable state,
//! not an error.
//!
//! Step transitions are checked synchronously; the external calls (create
//! student, create invoice, payment URL) run in [`BookingSession::confirm`]
//! and [`BookingSession::choose_learner`] and never advance the step on
//! failure, so a retry picks up exactly where the user left off.

use chrono::{Datelike, NaiveDate};

use lessonly_client::{
    InvoiceDraft, InvoiceRecord, NewStudent, PaymentRequest, ReferralValidation,
};
use lessonly_core::{
    pro_rated_pricing, remaining_lesson_dates, validate_bonus, BookingError, BookingId, Course,
    PriceBreakdown, ProRatedPricing, StudentId, UserId,
};

use crate::backend::BookingBackend;
use crate::error::FlowError;

/// The steps of a booking, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStep {
    /// Waiting for an externally established session.
    Auth,
    /// Collecting contact/messenger details.
    Contact,
    /// Choosing who the booking is for.
    Student,
    /// Reviewing price and confirming; the only step with billing effects.
    Confirmation,
    /// Booked; terminal for this attempt.
    Success,
}

/// Contact details collected in the contact step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInfo {
    /// Phone number.
    pub phone: String,
    /// Messenger handle (Telegram/WhatsApp).
    pub messenger: String,
}

impl ContactInfo {
    /// Whether both fields carry a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.phone.trim().is_empty() && !self.messenger.trim().is_empty()
    }
}

/// The booking user's profile, as established by the external auth layer.
#[derive(Debug, Clone)]
pub struct UserProfile {
    /// Account id.
    pub id: UserId,
    /// Given name.
    pub name: String,
    /// Family name.
    pub family: String,
    /// Contact details already on file, if any.
    pub contact: Option<ContactInfo>,
    /// Wallet bonus balance in minor units. Read-only here; only the
    /// external payment-confirmation flow decrements it.
    pub bonus_balance_minor: i64,
    /// The user who referred this account, if any.
    pub referrer: Option<String>,
}

impl UserProfile {
    fn has_complete_contact(&self) -> bool {
        self.contact.as_ref().is_some_and(ContactInfo::is_complete)
    }
}

/// Who the booking is for.
#[derive(Debug, Clone)]
pub enum LearnerChoice {
    /// The account owner learns themselves.
    AccountOwner,
    /// An already-registered dependent.
    Existing {
        /// The dependent's record id.
        id: StudentId,
        /// Given name.
        name: String,
        /// Family name.
        family: String,
    },
    /// A dependent to register now; creation runs before the step advances.
    New(NewStudent),
}

/// The resolved learner a confirmed booking is invoiced for.
#[derive(Debug, Clone)]
struct Learner {
    name: String,
    family: String,
}

/// A referral discount accepted from the validation service.
#[derive(Debug, Clone)]
pub struct AppliedReferral {
    /// The referral code.
    pub code: String,
    /// Pre-computed discount in minor units.
    pub discount_minor: i64,
}

/// What a successful confirmation resolved to.
#[derive(Debug, Clone)]
pub enum ConfirmOutcome {
    /// Direct payment is allowed: redirect the browser to the gateway.
    RedirectToPayment {
        /// The created invoice.
        invoice: InvoiceRecord,
        /// The gateway redirect URL.
        payment_url: String,
    },
    /// Direct payment is not allowed: the invoice stays unpaid for later.
    AwaitingPayment {
        /// The created invoice.
        invoice: InvoiceRecord,
    },
}

/// One booking attempt.
///
/// Holds the inputs collected across steps and drives the terminal
/// confirmation sequence. A single confirmation produces at most one
/// invoice: the invoice handle is cached in the session, re-entrancy is
/// guarded, and the wire request carries the session's [`BookingId`] as an
/// idempotency key.
#[derive(Debug)]
pub struct BookingSession {
    id: BookingId,
    course: Course,
    user: UserProfile,
    step: BookingStep,
    contact: Option<ContactInfo>,
    learner: Option<Learner>,
    period: Option<(i32, u32)>,
    referral: Option<AppliedReferral>,
    bonuses_minor: i64,
    confirm_pending: bool,
    invoice: Option<InvoiceRecord>,
}

impl BookingSession {
    /// Start a booking attempt for a course.
    ///
    /// # Errors
    ///
    /// Rejects a course that cannot be booked at all (empty weekday set or
    /// inverted active range).
    pub fn new(course: Course, user: UserProfile) -> Result<Self, FlowError> {
        course.validate()?;
        Ok(Self {
            id: BookingId::generate(),
            course,
            user,
            step: BookingStep::Auth,
            contact: None,
            learner: None,
            period: None,
            referral: None,
            bonuses_minor: 0,
            confirm_pending: false,
            invoice: None,
        })
    }

    /// The session's current step.
    #[must_use]
    pub fn step(&self) -> BookingStep {
        self.step
    }

    /// This attempt's idempotency key.
    #[must_use]
    pub fn booking_id(&self) -> BookingId {
        self.id
    }

    /// Whether a confirmation request is in flight. The UI must keep the
    /// confirm action disabled while this is true.
    #[must_use]
    pub fn is_confirm_pending(&self) -> bool {
        self.confirm_pending
    }

    /// The invoice created by this attempt, if confirmation got that far.
    #[must_use]
    pub fn invoice(&self) -> Option<&InvoiceRecord> {
        self.invoice.as_ref()
    }

    /// The contact details in effect for this booking, for display on the
    /// confirmation screen.
    #[must_use]
    pub fn contact(&self) -> Option<&ContactInfo> {
        self.contact.as_ref()
    }

    /// The referral discount in effect for this booking, if any.
    #[must_use]
    pub fn referral(&self) -> Option<&AppliedReferral> {
        self.referral.as_ref()
    }

    /// Record that the external auth layer established a session.
    ///
    /// Advances to the contact step, or straight to the student step when
    /// the profile already has complete contact data.
    ///
    /// # Errors
    ///
    /// Rejected outside the auth step.
    pub fn establish_session(&mut self) -> Result<BookingStep, FlowError> {
        self.expect_step(BookingStep::Auth)?;
        self.step = if self.user.has_complete_contact() {
            self.contact.clone_from(&self.user.contact);
            BookingStep::Student
        } else {
            BookingStep::Contact
        };
        Ok(self.step)
    }

    /// Submit contact details and advance to the student step.
    ///
    /// # Errors
    ///
    /// Rejected outside the contact step or with incomplete fields.
    pub fn submit_contact(&mut self, contact: ContactInfo) -> Result<BookingStep, FlowError> {
        self.expect_step(BookingStep::Contact)?;
        if !contact.is_complete() {
            return Err(FlowError::IncompleteContact);
        }
        self.contact = Some(contact);
        self.step = BookingStep::Student;
        Ok(self.step)
    }

    /// Resolve the learner and advance to the confirmation step.
    ///
    /// Choosing a new dependent runs the external create-student call
    /// first; if it fails the session stays in the student step.
    ///
    /// # Errors
    ///
    /// Rejected outside the student step; propagates backend failures.
    pub async fn choose_learner<B: BookingBackend + ?Sized>(
        &mut self,
        backend: &B,
        choice: LearnerChoice,
    ) -> Result<BookingStep, FlowError> {
        self.expect_step(BookingStep::Student)?;
        let learner = match choice {
            LearnerChoice::AccountOwner => Learner {
                name: self.user.name.clone(),
                family: self.user.family.clone(),
            },
            LearnerChoice::Existing { name, family, .. } => Learner { name, family },
            LearnerChoice::New(student) => {
                let record = backend.create_student(&self.user.id, student).await?;
                Learner {
                    name: record.name,
                    family: record.family,
                }
            }
        };
        self.learner = Some(learner);
        self.step = BookingStep::Confirmation;
        Ok(self.step)
    }

    /// Select which calendar month to book. Defaults to the current month.
    pub fn select_month(&mut self, year: i32, month: u32) {
        self.period = Some((year, month));
    }

    /// Accept a referral discount from the validation service.
    ///
    /// The discount amount is opaque here; it is re-validated against the
    /// actual base price when the booking is confirmed.
    ///
    /// # Errors
    ///
    /// Rejects a validation response with `is_valid = false`.
    pub fn apply_referral(
        &mut self,
        code: impl Into<String>,
        validation: &ReferralValidation,
    ) -> Result<(), FlowError> {
        if !validation.is_valid {
            return Err(FlowError::ReferralRejected {
                reason: validation
                    .error
                    .clone()
                    .unwrap_or_else(|| "referral code is not valid".to_string()),
            });
        }
        self.referral = Some(AppliedReferral {
            code: code.into(),
            discount_minor: validation.discount_amount,
        });
        Ok(())
    }

    /// Request a bonus debit for this booking.
    ///
    /// Validated eagerly against the wallet balance and the quoted
    /// remainder for `today`, so the user is re-prompted instead of having
    /// the value silently clamped.
    ///
    /// # Errors
    ///
    /// Rejected outside the confirmation step; propagates the bonus
    /// validation errors and `NoLessonsRemaining` for an empty window.
    pub fn set_bonuses(&mut self, amount_minor: i64, today: NaiveDate) -> Result<(), FlowError> {
        self.expect_step(BookingStep::Confirmation)?;
        let (year, month) = self.period_for(today);
        let quote = self.quote(today);
        if quote.remaining_lessons == 0 {
            return Err(BookingError::NoLessonsRemaining { year, month }.into());
        }
        let discount = self.discount_minor();
        validate_bonus(
            amount_minor,
            self.user.bonus_balance_minor,
            quote.pro_rated_minor - discount,
        )?;
        self.bonuses_minor = amount_minor;
        Ok(())
    }

    /// The pro-rated quote for this booking, with `today` as the cutoff.
    #[must_use]
    pub fn quote(&self, today: NaiveDate) -> ProRatedPricing {
        let (year, month) = self.period_for(today);
        pro_rated_pricing(&self.course, year, month, today)
    }

    /// Confirm the booking: price the remaining window, stack discounts,
    /// create the invoice, and resolve the payment path.
    ///
    /// At most one invoice per session: a retry after a post-invoice
    /// failure reuses the already-created invoice instead of creating a
    /// second one. On any failure the session stays in the confirmation
    /// step.
    ///
    /// # Errors
    ///
    /// Rejected outside the confirmation step or while a previous
    /// confirmation is pending; fails fast with `NoLessonsRemaining` when
    /// the window is empty; propagates discount validation and backend
    /// errors.
    pub async fn confirm<B: BookingBackend + ?Sized>(
        &mut self,
        backend: &B,
        today: NaiveDate,
    ) -> Result<ConfirmOutcome, FlowError> {
        self.expect_step(BookingStep::Confirmation)?;
        if self.confirm_pending {
            return Err(FlowError::ConfirmationInFlight);
        }

        self.confirm_pending = true;
        let result = self.run_confirm(backend, today).await;
        self.confirm_pending = false;

        if result.is_ok() {
            self.step = BookingStep::Success;
        }
        result
    }

    /// Start over: back to the auth step with a fresh booking id and no
    /// collected inputs.
    pub fn reset(&mut self) {
        self.id = BookingId::generate();
        self.step = BookingStep::Auth;
        self.contact = None;
        self.learner = None;
        self.period = None;
        self.referral = None;
        self.bonuses_minor = 0;
        self.confirm_pending = false;
        self.invoice = None;
    }

    async fn run_confirm<B: BookingBackend + ?Sized>(
        &mut self,
        backend: &B,
        today: NaiveDate,
    ) -> Result<ConfirmOutcome, FlowError> {
        let learner = self.learner.clone().ok_or(FlowError::MissingLearner)?;
        let (year, month) = self.period_for(today);

        let dates = remaining_lesson_dates(&self.course, year, month, today);
        let (Some(first), Some(last)) = (dates.first().copied(), dates.last().copied()) else {
            return Err(BookingError::NoLessonsRemaining { year, month }.into());
        };

        let quote = pro_rated_pricing(&self.course, year, month, today);
        let breakdown = PriceBreakdown::stack(
            quote.pro_rated_minor,
            self.discount_minor(),
            self.bonuses_minor,
            self.user.bonus_balance_minor,
        )?;

        let invoice = if let Some(existing) = &self.invoice {
            existing.clone()
        } else {
            let draft = InvoiceDraft {
                name: learner.name,
                family: learner.family,
                sum: breakdown.payable_minor,
                original_sum: breakdown.original_minor,
                discount_amount: breakdown.discount_minor,
                bonuses_used: breakdown.bonuses_minor,
                currency: self.course.currency.clone(),
                start_date: first,
                end_date: last,
                status_payment: false,
                course: self.course.id.clone(),
                owner: self.user.id.clone(),
                referral_code: self.referral.as_ref().map(|r| r.code.clone()),
                referrer: self.user.referrer.clone(),
                booking_id: self.id,
            };
            let record = backend.create_invoice(&draft).await?;
            self.invoice = Some(record.clone());
            record
        };

        if backend
            .direct_payment_allowed(&self.course.id, &invoice.id)
            .await?
        {
            let session = backend
                .create_payment(&PaymentRequest {
                    user: self.user.id.clone(),
                    course: self.course.id.clone(),
                    amount: invoice.sum,
                    currency: invoice.currency.clone(),
                    invoice_id: invoice.id.clone(),
                })
                .await?;
            tracing::info!(
                booking_id = %self.id,
                invoice_id = %invoice.id,
                "booking confirmed, redirecting to payment"
            );
            Ok(ConfirmOutcome::RedirectToPayment {
                invoice,
                payment_url: session.payment_url,
            })
        } else {
            tracing::info!(
                booking_id = %self.id,
                invoice_id = %invoice.id,
                "booking confirmed, invoice awaiting payment"
            );
            Ok(ConfirmOutcome::AwaitingPayment { invoice })
        }
    }

    fn period_for(&self, today: NaiveDate) -> (i32, u32) {
        self.period.unwrap_or((today.year(), today.month()))
    }

    fn discount_minor(&self) -> i64 {
        self.referral.as_ref().map_or(0, |r| r.discount_minor)
    }

    fn expect_step(&self, expected: BookingStep) -> Result<(), FlowError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(FlowError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_info_completeness() {
        let complete = ContactInfo {
            phone: "+7 900 000-00-00".into(),
            messenger: "@anna".into(),
        };
        assert!(complete.is_complete());

        let blank_messenger = ContactInfo {
            phone: "+7 900 000-00-00".into(),
            messenger: "   ".into(),
        };
        assert!(!blank_messenger.is_complete());
    }
}
