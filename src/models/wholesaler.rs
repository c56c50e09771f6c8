use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::user::Role;
use crate::entities::wholesaler::{self, VerificationStatus, WholesalerStatus};
use crate::entities::wholesaler_document;

use super::validate_mobile;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWholesalerRequest {
    #[validate(nested)]
    pub user: NewWholesalerUser,
    #[validate(nested)]
    pub wholesaler: WholesalerProfileInput,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewWholesalerUser {
    #[validate(length(min = 3, max = 64, message = "Username must be 3 to 64 characters"))]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(custom(function = "validate_mobile"))]
    pub phone: String,
}

/// Business attributes supplied by an admin at creation time.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WholesalerProfileInput {
    #[validate(length(min = 3, max = 255, message = "Business name must be 3 to 255 characters"))]
    pub business_name: String,
    pub business_category_id: i32,
    #[validate(length(min = 3, max = 255, message = "Owner name must be 3 to 255 characters"))]
    pub owner_name: String,
    #[validate(length(min = 5, message = "Business address must be at least 5 characters"))]
    pub business_address: String,
    #[validate(length(min = 5, message = "Billing address must be at least 5 characters"))]
    pub billing_address: Option<String>,
    #[validate(custom(function = "validate_mobile"))]
    pub alternate_phone_number: Option<String>,
    #[validate(url(message = "Invalid website URL"))]
    pub website_url: Option<String>,
    #[validate(length(max = 32))]
    pub gst_number: Option<String>,
    #[validate(length(max = 32))]
    pub pan_number: Option<String>,
    #[validate(length(max = 32))]
    pub aadhar_number: Option<String>,
    #[validate(length(max = 32))]
    pub msme_number: Option<String>,
    #[validate(range(min = 0, max = 200))]
    pub years_in_business: Option<i32>,
    #[validate(range(min = 0))]
    pub number_of_employees: Option<i32>,
    #[validate(range(min = 0.0))]
    pub annual_turnover: Option<f64>,
    #[validate(length(max = 64))]
    pub trade_license_number: Option<String>,
}

/// Self-signup profile. Phone and business category come from the caller's
/// account instead of the body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OwnProfileRequest {
    #[validate(length(min = 1, max = 255, message = "Business name is required"))]
    pub business_name: String,
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    pub owner_name: Option<String>,
    #[validate(custom(function = "validate_mobile"))]
    pub alternate_phone_number: Option<String>,
    pub website_url: Option<String>,
    pub business_address: Option<String>,
    pub billing_address: Option<String>,
    #[validate(length(max = 64))]
    pub trade_license_number: Option<String>,
    #[validate(length(max = 32))]
    pub msme_number: Option<String>,
    #[validate(range(min = 0, max = 200))]
    pub years_in_business: Option<i32>,
    #[validate(range(min = 0))]
    pub number_of_employees: Option<i32>,
    #[validate(range(min = 0.0))]
    pub annual_turnover: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUrls {
    #[validate(url(message = "Invalid GST certificate URL"))]
    pub gst_certificate_url: Option<String>,
    #[validate(url(message = "Invalid PAN card URL"))]
    pub pan_card_url: Option<String>,
    #[validate(url(message = "Invalid Aadhar card URL"))]
    pub aadhar_card_url: Option<String>,
    #[validate(url(message = "Invalid bank statement URL"))]
    pub bank_statement_url: Option<String>,
    #[validate(url(message = "Invalid business proof URL"))]
    pub business_proof_url: Option<String>,
    #[validate(url(message = "Invalid cancelled cheque URL"))]
    pub cancelled_cheque_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: VerificationStatus,
}

/// Keys are the document status column names. Anything else is rejected.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentStatusUpdateRequest {
    pub gst_certificate_status: Option<VerificationStatus>,
    pub pan_card_status: Option<VerificationStatus>,
    pub aadhar_card_status: Option<VerificationStatus>,
    pub bank_statement_status: Option<VerificationStatus>,
    pub business_proof_status: Option<VerificationStatus>,
    pub cancelled_cheque_status: Option<VerificationStatus>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub status: VerificationStatus,
    #[validate(range(min = 0.0, message = "Credit limit cannot be negative"))]
    pub initial_credit_limit: Option<f64>,
    #[validate(length(max = 500, message = "Admin note must not exceed 500 characters"))]
    pub admin_note: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WholesalerListQuery {
    pub status: Option<WholesalerStatus>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedWholesaler {
    pub user_id: i32,
    pub wholesaler_id: i32,
    pub status: WholesalerStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentsCreated {
    pub wholesaler_id: i32,
    pub documents_created: bool,
    pub status: WholesalerStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdated {
    pub wholesaler_id: i32,
    pub status: WholesalerStatus,
    pub user_verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStatusesUpdated {
    pub wholesaler_id: i32,
    pub updated_fields: Vec<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStatuses {
    pub gst_certificate_status: VerificationStatus,
    pub pan_card_status: VerificationStatus,
    pub aadhar_card_status: VerificationStatus,
    pub bank_statement_status: VerificationStatus,
    pub business_proof_status: VerificationStatus,
    pub cancelled_cheque_status: VerificationStatus,
}

impl From<&wholesaler_document::Model> for DocumentStatuses {
    fn from(documents: &wholesaler_document::Model) -> Self {
        Self {
            gst_certificate_status: documents.gst_certificate_status,
            pan_card_status: documents.pan_card_status,
            aadhar_card_status: documents.aadhar_card_status,
            bank_statement_status: documents.bank_statement_status,
            business_proof_status: documents.business_proof_status,
            cancelled_cheque_status: documents.cancelled_cheque_status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationOutcome {
    pub wholesaler_id: i32,
    pub status: WholesalerStatus,
    pub user_verified: bool,
    pub documents_status: DocumentStatuses,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedWholesaler {
    pub wholesaler_id: i32,
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentView {
    pub url: Option<String>,
    pub status: VerificationStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentsView {
    pub gst_certificate: DocumentView,
    pub pan_card: DocumentView,
    pub aadhar_card: DocumentView,
    pub bank_statement: DocumentView,
    pub business_proof: DocumentView,
    pub cancelled_cheque: DocumentView,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<wholesaler_document::Model> for DocumentsView {
    fn from(documents: wholesaler_document::Model) -> Self {
        let slot = |url: Option<String>, status| DocumentView { url, status };
        Self {
            gst_certificate: slot(documents.gst_certificate_url, documents.gst_certificate_status),
            pan_card: slot(documents.pan_card_url, documents.pan_card_status),
            aadhar_card: slot(documents.aadhar_card_url, documents.aadhar_card_status),
            bank_statement: slot(documents.bank_statement_url, documents.bank_statement_status),
            business_proof: slot(documents.business_proof_url, documents.business_proof_status),
            cancelled_cheque: slot(
                documents.cancelled_cheque_url,
                documents.cancelled_cheque_status,
            ),
            updated_at: documents.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WholesalerSummary {
    pub id: i32,
    pub user_id: i32,
    pub business_name: String,
    pub business_category_id: i32,
    pub owner_name: Option<String>,
    pub phone_number: String,
    pub status: WholesalerStatus,
    pub created_at: DateTimeWithTimeZone,
}

impl From<wholesaler::Model> for WholesalerSummary {
    fn from(profile: wholesaler::Model) -> Self {
        Self {
            id: profile.id,
            user_id: profile.user_id,
            business_name: profile.business_name,
            business_category_id: profile.business_category_id,
            owner_name: profile.owner_name,
            phone_number: profile.phone_number,
            status: profile.status,
            created_at: profile.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WholesalerPage {
    pub items: Vec<WholesalerSummary>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WholesalerDetail {
    pub id: i32,
    pub user_id: i32,
    pub user_verified: bool,
    pub business_name: String,
    pub business_category_id: i32,
    pub owner_name: Option<String>,
    pub phone_number: String,
    pub alternate_phone_number: Option<String>,
    pub email: Option<String>,
    pub website_url: Option<String>,
    pub business_address: Option<String>,
    pub billing_address: Option<String>,
    pub gst_number: Option<String>,
    pub pan_number: Option<String>,
    pub aadhar_number: Option<String>,
    pub msme_number: Option<String>,
    pub years_in_business: Option<i32>,
    pub number_of_employees: Option<i32>,
    pub annual_turnover: Option<f64>,
    pub trade_license_number: Option<String>,
    pub status: WholesalerStatus,
    pub credit_limit: Option<f64>,
    pub admin_note: Option<String>,
    pub created_by_id: Option<i32>,
    pub created_by_role: Option<Role>,
    pub verified_by_id: Option<i32>,
    pub verified_by_role: Option<Role>,
    pub verified_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub documents: Option<DocumentsView>,
}

impl WholesalerDetail {
    pub fn new(
        profile: wholesaler::Model,
        user_verified: bool,
        documents: Option<wholesaler_document::Model>,
    ) -> Self {
        Self {
            id: profile.id,
            user_id: profile.user_id,
            user_verified,
            business_name: profile.business_name,
            business_category_id: profile.business_category_id,
            owner_name: profile.owner_name,
            phone_number: profile.phone_number,
            alternate_phone_number: profile.alternate_phone_number,
            email: profile.email,
            website_url: profile.website_url,
            business_address: profile.business_address,
            billing_address: profile.billing_address,
            gst_number: profile.gst_number,
            pan_number: profile.pan_number,
            aadhar_number: profile.aadhar_number,
            msme_number: profile.msme_number,
            years_in_business: profile.years_in_business,
            number_of_employees: profile.number_of_employees,
            annual_turnover: profile.annual_turnover,
            trade_license_number: profile.trade_license_number,
            status: profile.status,
            credit_limit: profile.credit_limit,
            admin_note: profile.admin_note,
            created_by_id: profile.created_by_id,
            created_by_role: profile.created_by_role,
            verified_by_id: profile.verified_by_id,
            verified_by_role: profile.verified_by_role,
            verified_at: profile.verified_at,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
            documents: documents.map(DocumentsView::from),
        }
    }
}
