//! Wholesaler onboarding and verification workflow.
//!
//! Each public operation is one database transaction. The profile status, the
//! owning user's `is_verified` flag and the six document statuses are only
//! changed together, under a row lock on the wholesaler.

mod repository;
#[cfg(test)]
mod tests;

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::{info, warn};

use crate::entities::user::Role;
use crate::entities::wholesaler::{self, VerificationStatus, WholesalerStatus};
use crate::entities::wholesaler_document;
use crate::error::{ConflictKind, DomainError, Resource};
use crate::models::wholesaler::{
    CreateWholesalerRequest, CreatedWholesaler, DeletedWholesaler, DocumentStatusUpdateRequest,
    DocumentStatuses, DocumentStatusesUpdated, DocumentUrls, DocumentsCreated, OwnProfileRequest,
    StatusUpdated, VerificationOutcome, VerifyRequest, WholesalerDetail, WholesalerListQuery,
    WholesalerPage, WholesalerSummary,
};
use crate::normalize::{normalize_email, trim_to_option};
use crate::users::{self, NewUser};

pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// The account performing an admin action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i32,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    GstCertificate,
    PanCard,
    AadharCard,
    BankStatement,
    BusinessProof,
    CancelledCheque,
}

impl DocumentKind {
    pub const ALL: [Self; 6] = [
        Self::GstCertificate,
        Self::PanCard,
        Self::AadharCard,
        Self::BankStatement,
        Self::BusinessProof,
        Self::CancelledCheque,
    ];

    /// Column name of this slot's status, as accepted by the status update body.
    pub fn status_field(self) -> &'static str {
        match self {
            Self::GstCertificate => "gst_certificate_status",
            Self::PanCard => "pan_card_status",
            Self::AadharCard => "aadhar_card_status",
            Self::BankStatement => "bank_statement_status",
            Self::BusinessProof => "business_proof_status",
            Self::CancelledCheque => "cancelled_cheque_status",
        }
    }

    fn set_status(self, documents: &mut wholesaler_document::ActiveModel, status: VerificationStatus) {
        match self {
            Self::GstCertificate => documents.gst_certificate_status = Set(status),
            Self::PanCard => documents.pan_card_status = Set(status),
            Self::AadharCard => documents.aadhar_card_status = Set(status),
            Self::BankStatement => documents.bank_statement_status = Set(status),
            Self::BusinessProof => documents.business_proof_status = Set(status),
            Self::CancelledCheque => documents.cancelled_cheque_status = Set(status),
        }
    }

    fn requested(self, request: &DocumentStatusUpdateRequest) -> Option<VerificationStatus> {
        match self {
            Self::GstCertificate => request.gst_certificate_status,
            Self::PanCard => request.pan_card_status,
            Self::AadharCard => request.aadhar_card_status,
            Self::BankStatement => request.bank_statement_status,
            Self::BusinessProof => request.business_proof_status,
            Self::CancelledCheque => request.cancelled_cheque_status,
        }
    }
}

/// Stage 1. Creates the wholesaler-role user and its `pending` profile.
pub async fn create_wholesaler(
    db: &DatabaseConnection,
    actor: Actor,
    request: CreateWholesalerRequest,
) -> Result<CreatedWholesaler, DomainError> {
    let txn = db.begin().await?;
    let result = insert_user_and_profile(&txn, actor, request).await;
    let created = finish(txn, result).await?;
    info!(
        wholesaler_id = created.wholesaler_id,
        user_id = created.user_id,
        created_by = actor.user_id,
        "Wholesaler profile created"
    );
    Ok(created)
}

async fn insert_user_and_profile(
    txn: &DatabaseTransaction,
    actor: Actor,
    request: CreateWholesalerRequest,
) -> Result<CreatedWholesaler, DomainError> {
    let CreateWholesalerRequest { user, wholesaler: input } = request;
    let phone = user.phone.trim().to_string();
    let email = normalize_email(Some(user.email));

    let account = users::insert(
        txn,
        NewUser {
            username: user.username.trim().to_string(),
            email: email.clone(),
            phone: phone.clone(),
            role: Role::Wholesaler,
            business_category_id: None,
        },
    )
    .await?;

    let now = Utc::now().fixed_offset();
    let profile = wholesaler::ActiveModel {
        user_id: Set(account.id),
        business_name: Set(input.business_name.trim().to_string()),
        business_category_id: Set(input.business_category_id),
        owner_name: Set(trim_to_option(Some(input.owner_name))),
        phone_number: Set(phone),
        alternate_phone_number: Set(trim_to_option(input.alternate_phone_number)),
        email: Set(email),
        website_url: Set(trim_to_option(input.website_url)),
        business_address: Set(trim_to_option(Some(input.business_address))),
        billing_address: Set(trim_to_option(input.billing_address)),
        gst_number: Set(trim_to_option(input.gst_number)),
        pan_number: Set(trim_to_option(input.pan_number)),
        aadhar_number: Set(trim_to_option(input.aadhar_number)),
        msme_number: Set(trim_to_option(input.msme_number)),
        years_in_business: Set(input.years_in_business),
        number_of_employees: Set(input.number_of_employees),
        annual_turnover: Set(input.annual_turnover),
        trade_license_number: Set(trim_to_option(input.trade_license_number)),
        status: Set(WholesalerStatus::Pending),
        created_by_id: Set(Some(actor.user_id)),
        created_by_role: Set(Some(actor.role)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let profile = repository::insert_wholesaler(txn, profile).await?;

    Ok(CreatedWholesaler {
        user_id: account.id,
        wholesaler_id: profile.id,
        status: profile.status,
    })
}

/// Self-signup. The profile starts at `profile_pending` until documents arrive.
pub async fn create_own_profile(
    db: &DatabaseConnection,
    user_id: i32,
    request: OwnProfileRequest,
) -> Result<CreatedWholesaler, DomainError> {
    let txn = db.begin().await?;
    let result = insert_own_profile(&txn, user_id, request).await;
    let created = finish(txn, result).await?;
    info!(
        wholesaler_id = created.wholesaler_id,
        user_id, "Self-signup wholesaler profile created"
    );
    Ok(created)
}

async fn insert_own_profile(
    txn: &DatabaseTransaction,
    user_id: i32,
    request: OwnProfileRequest,
) -> Result<CreatedWholesaler, DomainError> {
    let account = users::find_by_id(txn, user_id)
        .await?
        .ok_or(DomainError::NotFound(Resource::User))?;
    if repository::find_wholesaler_by_user(txn, user_id).await?.is_some() {
        return Err(DomainError::Conflict(ConflictKind::ProfileAlreadyExists));
    }
    let business_category_id = account
        .business_category_id
        .ok_or(DomainError::InvalidReference)?;

    let now = Utc::now().fixed_offset();
    let profile = wholesaler::ActiveModel {
        user_id: Set(account.id),
        business_name: Set(request.business_name.trim().to_string()),
        business_category_id: Set(business_category_id),
        owner_name: Set(trim_to_option(request.owner_name)),
        phone_number: Set(account.phone.clone()),
        alternate_phone_number: Set(trim_to_option(request.alternate_phone_number)),
        email: Set(normalize_email(Some(request.email))),
        website_url: Set(trim_to_option(request.website_url)),
        business_address: Set(trim_to_option(request.business_address)),
        billing_address: Set(trim_to_option(request.billing_address)),
        msme_number: Set(trim_to_option(request.msme_number)),
        years_in_business: Set(request.years_in_business),
        number_of_employees: Set(request.number_of_employees),
        annual_turnover: Set(request.annual_turnover),
        trade_license_number: Set(trim_to_option(request.trade_license_number)),
        status: Set(WholesalerStatus::ProfilePending),
        created_by_id: Set(Some(account.id)),
        created_by_role: Set(Some(account.role)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let profile = repository::insert_wholesaler(txn, profile).await?;

    Ok(CreatedWholesaler {
        user_id: account.id,
        wholesaler_id: profile.id,
        status: profile.status,
    })
}

/// Stage 2 on behalf of a wholesaler.
pub async fn submit_documents(
    db: &DatabaseConnection,
    wholesaler_id: i32,
    urls: DocumentUrls,
) -> Result<DocumentsCreated, DomainError> {
    let txn = db.begin().await?;
    let result = match repository::lock_wholesaler(&txn, wholesaler_id).await {
        Ok(Some(profile)) => store_documents(&txn, profile, urls).await,
        Ok(None) => Err(DomainError::NotFound(Resource::Wholesaler)),
        Err(err) => Err(err.into()),
    };
    finish(txn, result).await
}

/// Stage 2 for the caller's own profile.
pub async fn submit_own_documents(
    db: &DatabaseConnection,
    user_id: i32,
    urls: DocumentUrls,
) -> Result<DocumentsCreated, DomainError> {
    let txn = db.begin().await?;
    let result = match repository::lock_wholesaler_by_user(&txn, user_id).await {
        Ok(Some(profile)) => store_documents(&txn, profile, urls).await,
        Ok(None) => Err(DomainError::NotFound(Resource::Wholesaler)),
        Err(err) => Err(err.into()),
    };
    finish(txn, result).await
}

async fn store_documents(
    txn: &DatabaseTransaction,
    profile: wholesaler::Model,
    urls: DocumentUrls,
) -> Result<DocumentsCreated, DomainError> {
    let wholesaler_id = profile.id;
    if repository::find_documents(txn, wholesaler_id).await?.is_some() {
        return Err(DomainError::Conflict(ConflictKind::DocumentsAlreadySubmitted));
    }

    let now = Utc::now().fixed_offset();
    repository::insert_documents(txn, wholesaler_id, urls, now).await?;

    let mut status = profile.status;
    if status == WholesalerStatus::ProfilePending {
        let mut active: wholesaler::ActiveModel = profile.into();
        active.status = Set(WholesalerStatus::Pending);
        active.updated_at = Set(now);
        status = repository::update_wholesaler(txn, active).await?.status;
    }

    info!(wholesaler_id, status = status.as_str(), "Wholesaler documents submitted");
    Ok(DocumentsCreated {
        wholesaler_id,
        documents_created: true,
        status,
    })
}

/// Stage 4. Profile status and the user flag only; documents are untouched.
pub async fn set_status(
    db: &DatabaseConnection,
    wholesaler_id: i32,
    status: VerificationStatus,
) -> Result<StatusUpdated, DomainError> {
    let txn = db.begin().await?;
    let result = apply_status(&txn, wholesaler_id, status).await;
    finish(txn, result).await
}

async fn apply_status(
    txn: &DatabaseTransaction,
    wholesaler_id: i32,
    status: VerificationStatus,
) -> Result<StatusUpdated, DomainError> {
    let profile = repository::lock_wholesaler(txn, wholesaler_id)
        .await?
        .ok_or(DomainError::NotFound(Resource::Wholesaler))?;
    let user_id = profile.user_id;
    let status = WholesalerStatus::from(status);

    let mut active: wholesaler::ActiveModel = profile.into();
    active.status = Set(status);
    active.updated_at = Set(Utc::now().fixed_offset());
    repository::update_wholesaler(txn, active).await?;

    let user_verified = status.is_verified();
    sync_user_flag(txn, user_id, user_verified).await?;

    info!(wholesaler_id, status = status.as_str(), user_verified, "Wholesaler status updated");
    Ok(StatusUpdated {
        wholesaler_id,
        status,
        user_verified,
    })
}

/// Stage 5. Partial update of the per-document statuses.
pub async fn set_document_statuses(
    db: &DatabaseConnection,
    wholesaler_id: i32,
    request: DocumentStatusUpdateRequest,
) -> Result<DocumentStatusesUpdated, DomainError> {
    let changes: Vec<(DocumentKind, VerificationStatus)> = DocumentKind::ALL
        .into_iter()
        .filter_map(|kind| kind.requested(&request).map(|status| (kind, status)))
        .collect();
    if changes.is_empty() {
        return Err(DomainError::invalid_input(
            "At least one document status must be provided",
        ));
    }

    let txn = db.begin().await?;
    let result = apply_document_statuses(&txn, wholesaler_id, &changes).await;
    finish(txn, result).await
}

async fn apply_document_statuses(
    txn: &DatabaseTransaction,
    wholesaler_id: i32,
    changes: &[(DocumentKind, VerificationStatus)],
) -> Result<DocumentStatusesUpdated, DomainError> {
    repository::lock_wholesaler(txn, wholesaler_id)
        .await?
        .ok_or(DomainError::NotFound(Resource::Wholesaler))?;
    let documents = repository::find_documents(txn, wholesaler_id)
        .await?
        .ok_or(DomainError::NotFound(Resource::Documents))?;

    let now = Utc::now().fixed_offset();
    repository::update_document_statuses(txn, documents, changes, now).await?;

    let updated_fields: Vec<&'static str> =
        changes.iter().map(|(kind, _)| kind.status_field()).collect();
    info!(wholesaler_id, fields = ?updated_fields, "Document statuses updated");
    Ok(DocumentStatusesUpdated {
        wholesaler_id,
        updated_fields,
    })
}

/// Stage 3. Cascades one status to the profile, the user flag and every
/// document slot, creating the documents row if it does not exist yet.
pub async fn verify(
    db: &DatabaseConnection,
    actor: Actor,
    wholesaler_id: i32,
    request: VerifyRequest,
) -> Result<VerificationOutcome, DomainError> {
    let txn = db.begin().await?;
    let result = apply_verification(&txn, actor, wholesaler_id, request).await;
    finish(txn, result).await
}

async fn apply_verification(
    txn: &DatabaseTransaction,
    actor: Actor,
    wholesaler_id: i32,
    request: VerifyRequest,
) -> Result<VerificationOutcome, DomainError> {
    let profile = repository::lock_wholesaler(txn, wholesaler_id)
        .await?
        .ok_or(DomainError::NotFound(Resource::Wholesaler))?;
    let user_id = profile.user_id;
    let status = WholesalerStatus::from(request.status);
    let now = Utc::now().fixed_offset();

    let mut active: wholesaler::ActiveModel = profile.into();
    active.status = Set(status);
    active.verified_by_id = Set(Some(actor.user_id));
    active.verified_by_role = Set(Some(actor.role));
    active.verified_at = Set(status.is_verified().then_some(now));
    if let Some(limit) = request.initial_credit_limit {
        active.credit_limit = Set(Some(limit));
    }
    if let Some(note) = trim_to_option(request.admin_note) {
        active.admin_note = Set(Some(note));
    }
    active.updated_at = Set(now);
    repository::update_wholesaler(txn, active).await?;

    let user_verified = status.is_verified();
    sync_user_flag(txn, user_id, user_verified).await?;

    let inserted = repository::ensure_documents(txn, wholesaler_id, now).await?;
    let documents = repository::find_documents(txn, wholesaler_id)
        .await?
        .ok_or(DomainError::NotFound(Resource::Documents))?;
    let cascade: Vec<_> = DocumentKind::ALL
        .into_iter()
        .map(|kind| (kind, request.status))
        .collect();
    let documents = repository::update_document_statuses(txn, documents, &cascade, now).await?;

    info!(
        wholesaler_id,
        status = status.as_str(),
        user_verified,
        documents_created = inserted > 0,
        verified_by = actor.user_id,
        "Wholesaler verification applied"
    );
    Ok(VerificationOutcome {
        wholesaler_id,
        status,
        user_verified,
        documents_status: DocumentStatuses::from(&documents),
    })
}

pub async fn get_wholesaler(
    db: &DatabaseConnection,
    wholesaler_id: i32,
) -> Result<WholesalerDetail, DomainError> {
    let profile = repository::find_wholesaler(db, wholesaler_id)
        .await?
        .ok_or(DomainError::NotFound(Resource::Wholesaler))?;
    load_detail(db, profile).await
}

pub async fn get_own_profile(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<WholesalerDetail, DomainError> {
    let profile = repository::find_wholesaler_by_user(db, user_id)
        .await?
        .ok_or(DomainError::NotFound(Resource::Wholesaler))?;
    load_detail(db, profile).await
}

async fn load_detail(
    db: &DatabaseConnection,
    profile: wholesaler::Model,
) -> Result<WholesalerDetail, DomainError> {
    let account = users::find_by_id(db, profile.user_id)
        .await?
        .ok_or(DomainError::NotFound(Resource::User))?;
    let documents = repository::find_documents(db, profile.id).await?;
    Ok(WholesalerDetail::new(profile, account.is_verified, documents))
}

pub async fn list_wholesalers(
    db: &DatabaseConnection,
    query: &WholesalerListQuery,
) -> Result<WholesalerPage, DomainError> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0);
    let (items, total) = repository::list_wholesalers(db, query.status, limit, offset).await?;
    Ok(WholesalerPage {
        items: items.into_iter().map(WholesalerSummary::from).collect(),
        total,
        limit,
        offset,
    })
}

/// Removes the profile (documents cascade) and clears the user flag. The
/// account itself is kept.
pub async fn delete_wholesaler(
    db: &DatabaseConnection,
    wholesaler_id: i32,
) -> Result<DeletedWholesaler, DomainError> {
    let txn = db.begin().await?;
    let result = remove_profile(&txn, wholesaler_id).await;
    finish(txn, result).await
}

async fn remove_profile(
    txn: &DatabaseTransaction,
    wholesaler_id: i32,
) -> Result<DeletedWholesaler, DomainError> {
    let profile = repository::lock_wholesaler(txn, wholesaler_id)
        .await?
        .ok_or(DomainError::NotFound(Resource::Wholesaler))?;
    repository::delete_wholesaler(txn, wholesaler_id).await?;
    sync_user_flag(txn, profile.user_id, false).await?;
    info!(wholesaler_id, user_id = profile.user_id, "Wholesaler profile deleted");
    Ok(DeletedWholesaler {
        wholesaler_id,
        deleted: true,
    })
}

async fn sync_user_flag(
    txn: &DatabaseTransaction,
    user_id: i32,
    verified: bool,
) -> Result<(), DomainError> {
    if users::set_verified(txn, user_id, verified).await? == 0 {
        return Err(DomainError::NotFound(Resource::User));
    }
    Ok(())
}

/// Commits on success. On failure the transaction is rolled back explicitly
/// and the original error is returned.
async fn finish<T>(
    txn: DatabaseTransaction,
    result: Result<T, DomainError>,
) -> Result<T, DomainError> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                warn!("Transaction rollback failed: {rollback_err}");
            }
            if let DomainError::Unknown(source) = &err {
                tracing::error!("Workflow database error: {source}");
            }
            Err(err)
        }
    }
}
