use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait};

use super::*;
use crate::entities::prelude::{User, Wholesaler, WholesalerDocument};
use crate::entities::user;
use crate::models::wholesaler::{NewWholesalerUser, WholesalerProfileInput};
use crate::testing::{memory_database, seed_category};

const STATUSES: [VerificationStatus; 4] = [
    VerificationStatus::Pending,
    VerificationStatus::UnderReview,
    VerificationStatus::Verified,
    VerificationStatus::Rejected,
];

struct Fixture {
    db: DatabaseConnection,
    admin: Actor,
    category_id: i32,
}

async fn fixture() -> Fixture {
    let db = memory_database().await;
    let category = seed_category(&db, "General Trade").await;
    let admin = users::find_or_create_admin(&db, "root", "9000000001")
        .await
        .unwrap();
    Fixture {
        db,
        admin: Actor {
            user_id: admin.id,
            role: admin.role,
        },
        category_id: category.id,
    }
}

fn acme_request(username: &str, email: &str, phone: &str, category_id: i32) -> CreateWholesalerRequest {
    CreateWholesalerRequest {
        user: NewWholesalerUser {
            username: username.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        },
        wholesaler: WholesalerProfileInput {
            business_name: "Acme Traders".to_string(),
            business_category_id: category_id,
            owner_name: "Raj".to_string(),
            business_address: "123 Street".to_string(),
            ..Default::default()
        },
    }
}

async fn create_acme(fx: &Fixture) -> CreatedWholesaler {
    create_wholesaler(
        &fx.db,
        fx.admin,
        acme_request("acme1", "a@x.com", "9990001111", fx.category_id),
    )
    .await
    .unwrap()
}

async fn user_verified(db: &DatabaseConnection, user_id: i32) -> bool {
    user::Entity::find_by_id(user_id)
        .one(db)
        .await
        .unwrap()
        .unwrap()
        .is_verified
}

async fn document_rows(db: &DatabaseConnection) -> u64 {
    WholesalerDocument::find().count(db).await.unwrap()
}

async fn table_counts(db: &DatabaseConnection) -> (u64, u64, u64) {
    (
        User::find().count(db).await.unwrap(),
        Wholesaler::find().count(db).await.unwrap(),
        document_rows(db).await,
    )
}

fn all_statuses(statuses: &DocumentStatuses) -> [VerificationStatus; 6] {
    [
        statuses.gst_certificate_status,
        statuses.pan_card_status,
        statuses.aadhar_card_status,
        statuses.bank_statement_status,
        statuses.business_proof_status,
        statuses.cancelled_cheque_status,
    ]
}

#[tokio::test]
async fn acme_scenario_runs_through_verify_and_reject() {
    let fx = fixture().await;
    let created = create_acme(&fx).await;
    assert_eq!(created.status, WholesalerStatus::Pending);
    assert!(!user_verified(&fx.db, created.user_id).await);

    let profile = get_wholesaler(&fx.db, created.wholesaler_id).await.unwrap();
    assert_eq!(profile.created_by_id, Some(fx.admin.user_id));
    assert_eq!(profile.created_by_role, Some(Role::Admin));
    assert_eq!(profile.email.as_deref(), Some("a@x.com"));
    assert!(profile.documents.is_none());

    let request = VerifyRequest {
        status: VerificationStatus::Verified,
        initial_credit_limit: Some(50_000.0),
        admin_note: Some("KYC ok".to_string()),
    };
    let outcome = verify(&fx.db, fx.admin, created.wholesaler_id, request)
        .await
        .unwrap();
    assert_eq!(outcome.status, WholesalerStatus::Verified);
    assert!(outcome.user_verified);
    assert!(all_statuses(&outcome.documents_status)
        .iter()
        .all(|s| *s == VerificationStatus::Verified));
    assert!(user_verified(&fx.db, created.user_id).await);

    let profile = get_wholesaler(&fx.db, created.wholesaler_id).await.unwrap();
    assert_eq!(profile.credit_limit, Some(50_000.0));
    assert_eq!(profile.admin_note.as_deref(), Some("KYC ok"));
    assert_eq!(profile.verified_by_id, Some(fx.admin.user_id));
    assert!(profile.verified_at.is_some());

    let request = VerifyRequest {
        status: VerificationStatus::Rejected,
        initial_credit_limit: None,
        admin_note: None,
    };
    let outcome = verify(&fx.db, fx.admin, created.wholesaler_id, request)
        .await
        .unwrap();
    assert_eq!(outcome.status, WholesalerStatus::Rejected);
    assert!(!outcome.user_verified);
    assert!(all_statuses(&outcome.documents_status)
        .iter()
        .all(|s| *s == VerificationStatus::Rejected));
    assert!(!user_verified(&fx.db, created.user_id).await);

    let profile = get_wholesaler(&fx.db, created.wholesaler_id).await.unwrap();
    assert!(profile.verified_at.is_none());
    assert_eq!(profile.credit_limit, Some(50_000.0));
    assert_eq!(profile.admin_note.as_deref(), Some("KYC ok"));
}

#[tokio::test]
async fn status_only_update_tracks_user_flag() {
    let fx = fixture().await;
    let created = create_acme(&fx).await;

    for status in STATUSES {
        let updated = set_status(&fx.db, created.wholesaler_id, status).await.unwrap();
        let expected = status == VerificationStatus::Verified;
        assert_eq!(updated.user_verified, expected);
        assert_eq!(user_verified(&fx.db, created.user_id).await, expected);
    }
    assert_eq!(document_rows(&fx.db).await, 0);
}

#[tokio::test]
async fn status_update_on_missing_wholesaler_is_not_found() {
    let fx = fixture().await;
    let err = set_status(&fx.db, 404, VerificationStatus::Verified)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(Resource::Wholesaler)));
}

#[tokio::test]
async fn full_verify_cascades_every_status() {
    let fx = fixture().await;
    let created = create_acme(&fx).await;
    submit_documents(&fx.db, created.wholesaler_id, DocumentUrls::default())
        .await
        .unwrap();

    for status in STATUSES {
        let request = VerifyRequest {
            status,
            initial_credit_limit: None,
            admin_note: None,
        };
        let outcome = verify(&fx.db, fx.admin, created.wholesaler_id, request)
            .await
            .unwrap();
        assert!(all_statuses(&outcome.documents_status).iter().all(|s| *s == status));
        assert_eq!(
            user_verified(&fx.db, created.user_id).await,
            status == VerificationStatus::Verified
        );
    }
}

#[tokio::test]
async fn verify_creates_documents_row_once() {
    let fx = fixture().await;
    let created = create_acme(&fx).await;
    assert_eq!(document_rows(&fx.db).await, 0);

    for _ in 0..2 {
        let request = VerifyRequest {
            status: VerificationStatus::UnderReview,
            initial_credit_limit: None,
            admin_note: None,
        };
        verify(&fx.db, fx.admin, created.wholesaler_id, request)
            .await
            .unwrap();
        assert_eq!(document_rows(&fx.db).await, 1);
    }
}

#[tokio::test]
async fn second_document_submission_conflicts() {
    let fx = fixture().await;
    let created = create_acme(&fx).await;
    let urls = DocumentUrls {
        gst_certificate_url: Some("https://cdn.example.com/gst.pdf".to_string()),
        pan_card_url: Some("  ".to_string()),
        ..Default::default()
    };

    let first = submit_documents(&fx.db, created.wholesaler_id, urls.clone())
        .await
        .unwrap();
    assert!(first.documents_created);
    assert_eq!(first.status, WholesalerStatus::Pending);

    let err = submit_documents(&fx.db, created.wholesaler_id, urls)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::DocumentsAlreadySubmitted)
    ));
    assert_eq!(document_rows(&fx.db).await, 1);

    let detail = get_wholesaler(&fx.db, created.wholesaler_id).await.unwrap();
    let documents = detail.documents.unwrap();
    assert_eq!(
        documents.gst_certificate.url.as_deref(),
        Some("https://cdn.example.com/gst.pdf")
    );
    assert!(documents.pan_card.url.is_none());
    assert_eq!(documents.pan_card.status, VerificationStatus::Pending);
}

#[tokio::test]
async fn documents_for_missing_wholesaler_are_not_found() {
    let fx = fixture().await;
    let err = submit_documents(&fx.db, 77, DocumentUrls::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(Resource::Wholesaler)));
    assert_eq!(document_rows(&fx.db).await, 0);
}

#[tokio::test]
async fn document_status_update_leaves_profile_alone() {
    let fx = fixture().await;
    let created = create_acme(&fx).await;
    set_status(&fx.db, created.wholesaler_id, VerificationStatus::Verified)
        .await
        .unwrap();
    submit_documents(&fx.db, created.wholesaler_id, DocumentUrls::default())
        .await
        .unwrap();

    let request = DocumentStatusUpdateRequest {
        pan_card_status: Some(VerificationStatus::Rejected),
        cancelled_cheque_status: Some(VerificationStatus::UnderReview),
        ..Default::default()
    };
    let updated = set_document_statuses(&fx.db, created.wholesaler_id, request)
        .await
        .unwrap();
    assert_eq!(
        updated.updated_fields,
        ["pan_card_status", "cancelled_cheque_status"]
    );

    let detail = get_wholesaler(&fx.db, created.wholesaler_id).await.unwrap();
    assert_eq!(detail.status, WholesalerStatus::Verified);
    assert!(detail.user_verified);
    let documents = detail.documents.unwrap();
    assert_eq!(documents.pan_card.status, VerificationStatus::Rejected);
    assert_eq!(documents.cancelled_cheque.status, VerificationStatus::UnderReview);
    assert_eq!(documents.gst_certificate.status, VerificationStatus::Pending);
}

#[tokio::test]
async fn document_status_update_requires_fields_and_row() {
    let fx = fixture().await;
    let created = create_acme(&fx).await;

    let err = set_document_statuses(
        &fx.db,
        created.wholesaler_id,
        DocumentStatusUpdateRequest::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));

    let request = DocumentStatusUpdateRequest {
        gst_certificate_status: Some(VerificationStatus::Verified),
        ..Default::default()
    };
    let err = set_document_statuses(&fx.db, created.wholesaler_id, request)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(Resource::Documents)));
    assert_eq!(document_rows(&fx.db).await, 0);
}

#[tokio::test]
async fn failed_cascades_leave_all_tables_untouched() {
    let fx = fixture().await;
    let created = create_acme(&fx).await;
    set_status(&fx.db, created.wholesaler_id, VerificationStatus::UnderReview)
        .await
        .unwrap();
    let urls = DocumentUrls {
        gst_certificate_url: Some("https://cdn.example.com/gst.pdf".to_string()),
        ..Default::default()
    };
    submit_documents(&fx.db, created.wholesaler_id, urls).await.unwrap();
    let before = get_wholesaler(&fx.db, created.wholesaler_id).await.unwrap();
    let counts = table_counts(&fx.db).await;

    fx.db
        .execute_unprepared(
            "CREATE TRIGGER freeze_documents BEFORE UPDATE ON wholesaler_documents \
             BEGIN SELECT RAISE(ABORT, 'documents are frozen'); END",
        )
        .await
        .unwrap();

    let request = VerifyRequest {
        status: VerificationStatus::Verified,
        initial_credit_limit: Some(10_000.0),
        admin_note: Some("should not stick".to_string()),
    };
    assert!(verify(&fx.db, fx.admin, created.wholesaler_id, request).await.is_err());

    let request = DocumentStatusUpdateRequest {
        pan_card_status: Some(VerificationStatus::Rejected),
        ..Default::default()
    };
    assert!(set_document_statuses(&fx.db, created.wholesaler_id, request).await.is_err());

    let after = get_wholesaler(&fx.db, created.wholesaler_id).await.unwrap();
    assert_eq!(after, before);
    assert!(!user_verified(&fx.db, created.user_id).await);

    fx.db
        .execute_unprepared("DROP TRIGGER freeze_documents")
        .await
        .unwrap();
    fx.db
        .execute_unprepared(
            "CREATE TRIGGER freeze_users BEFORE UPDATE ON users \
             BEGIN SELECT RAISE(ABORT, 'users are frozen'); END",
        )
        .await
        .unwrap();

    assert!(set_status(&fx.db, created.wholesaler_id, VerificationStatus::Verified)
        .await
        .is_err());

    let after = get_wholesaler(&fx.db, created.wholesaler_id).await.unwrap();
    assert_eq!(after, before);
    assert_eq!(after.status, WholesalerStatus::UnderReview);
    assert!(!user_verified(&fx.db, created.user_id).await);
    assert_eq!(table_counts(&fx.db).await, counts);
}

#[tokio::test]
async fn duplicate_phone_rolls_back_everything() {
    let fx = fixture().await;
    create_acme(&fx).await;
    let before = table_counts(&fx.db).await;

    let err = create_wholesaler(
        &fx.db,
        fx.admin,
        acme_request("acme2", "b@x.com", "9990001111", fx.category_id),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ConflictKind::DuplicateValue)));
    assert_eq!(table_counts(&fx.db).await, before);
}

#[tokio::test]
async fn unknown_category_rolls_back_user_insert() {
    let fx = fixture().await;
    let before = table_counts(&fx.db).await;

    let err = create_wholesaler(
        &fx.db,
        fx.admin,
        acme_request("acme3", "c@x.com", "9990002222", fx.category_id + 50),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DomainError::InvalidReference));
    assert_eq!(table_counts(&fx.db).await, before);
    assert!(users::find_by_phone(&fx.db, "9990002222").await.unwrap().is_none());
}

#[tokio::test]
async fn self_signup_profile_advances_on_documents() {
    let fx = fixture().await;
    let account = users::insert(
        &fx.db,
        NewUser {
            username: "wholesaler123a".to_string(),
            email: None,
            phone: "8880001111".to_string(),
            role: Role::Wholesaler,
            business_category_id: Some(fx.category_id),
        },
    )
    .await
    .unwrap();

    let request = OwnProfileRequest {
        business_name: "Sharma Wholesale".to_string(),
        email: "Owner@Sharma.in".to_string(),
        owner_name: Some("Sharma".to_string()),
        alternate_phone_number: None,
        website_url: Some(String::new()),
        business_address: None,
        billing_address: None,
        trade_license_number: None,
        msme_number: None,
        years_in_business: Some(4),
        number_of_employees: None,
        annual_turnover: None,
    };
    let created = create_own_profile(&fx.db, account.id, request.clone())
        .await
        .unwrap();
    assert_eq!(created.status, WholesalerStatus::ProfilePending);

    let err = create_own_profile(&fx.db, account.id, request)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::ProfileAlreadyExists)
    ));

    let own = get_own_profile(&fx.db, account.id).await.unwrap();
    assert_eq!(own.phone_number, "8880001111");
    assert_eq!(own.email.as_deref(), Some("owner@sharma.in"));
    assert!(own.website_url.is_none());

    let submitted = submit_own_documents(&fx.db, account.id, DocumentUrls::default())
        .await
        .unwrap();
    assert_eq!(submitted.status, WholesalerStatus::Pending);
    let own = get_own_profile(&fx.db, account.id).await.unwrap();
    assert_eq!(own.status, WholesalerStatus::Pending);
    assert!(own.documents.is_some());
}

#[tokio::test]
async fn own_documents_without_profile_are_not_found() {
    let fx = fixture().await;
    let err = submit_own_documents(&fx.db, fx.admin.user_id, DocumentUrls::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(Resource::Wholesaler)));
}

#[tokio::test]
async fn list_filters_by_status() {
    let fx = fixture().await;
    let first = create_acme(&fx).await;
    create_wholesaler(
        &fx.db,
        fx.admin,
        acme_request("acme2", "b@x.com", "9990003333", fx.category_id),
    )
    .await
    .unwrap();
    set_status(&fx.db, first.wholesaler_id, VerificationStatus::Verified)
        .await
        .unwrap();

    let all = list_wholesalers(&fx.db, &WholesalerListQuery::default())
        .await
        .unwrap();
    assert_eq!(all.total, 2);
    assert_eq!(all.limit, DEFAULT_PAGE_SIZE);

    let query = WholesalerListQuery {
        status: Some(WholesalerStatus::Verified),
        ..Default::default()
    };
    let verified = list_wholesalers(&fx.db, &query).await.unwrap();
    assert_eq!(verified.total, 1);
    assert_eq!(verified.items[0].id, first.wholesaler_id);
}

#[tokio::test]
async fn delete_cascades_documents_and_clears_flag() {
    let fx = fixture().await;
    let created = create_acme(&fx).await;
    let request = VerifyRequest {
        status: VerificationStatus::Verified,
        initial_credit_limit: None,
        admin_note: None,
    };
    verify(&fx.db, fx.admin, created.wholesaler_id, request)
        .await
        .unwrap();
    assert_eq!(document_rows(&fx.db).await, 1);

    let deleted = delete_wholesaler(&fx.db, created.wholesaler_id).await.unwrap();
    assert!(deleted.deleted);
    assert_eq!(document_rows(&fx.db).await, 0);
    assert!(!user_verified(&fx.db, created.user_id).await);
    assert!(matches!(
        get_wholesaler(&fx.db, created.wholesaler_id).await,
        Err(DomainError::NotFound(Resource::Wholesaler))
    ));
    assert!(matches!(
        delete_wholesaler(&fx.db, created.wholesaler_id).await,
        Err(DomainError::NotFound(Resource::Wholesaler))
    ));
}
