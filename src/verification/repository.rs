//! Row-level access for the verification workflow. Everything here runs on
//! whatever connection it is handed, normally an open transaction, and returns
//! raw `DbErr`s for the service to classify.

use sea_orm::ActiveValue::Set;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::entities::wholesaler::{self, VerificationStatus, WholesalerStatus};
use crate::entities::wholesaler_document;
use crate::normalize::trim_to_option;
use crate::models::wholesaler::DocumentUrls;

use super::DocumentKind;

/// Loads the profile with `SELECT ... FOR UPDATE` so concurrent status
/// changes on the same wholesaler queue behind each other.
pub async fn lock_wholesaler<C>(db: &C, wholesaler_id: i32) -> Result<Option<wholesaler::Model>, DbErr>
where
    C: ConnectionTrait,
{
    wholesaler::Entity::find_by_id(wholesaler_id)
        .lock_exclusive()
        .one(db)
        .await
}

pub async fn lock_wholesaler_by_user<C>(
    db: &C,
    user_id: i32,
) -> Result<Option<wholesaler::Model>, DbErr>
where
    C: ConnectionTrait,
{
    wholesaler::Entity::find()
        .filter(wholesaler::Column::UserId.eq(user_id))
        .lock_exclusive()
        .one(db)
        .await
}

pub async fn find_wholesaler<C>(db: &C, wholesaler_id: i32) -> Result<Option<wholesaler::Model>, DbErr>
where
    C: ConnectionTrait,
{
    wholesaler::Entity::find_by_id(wholesaler_id).one(db).await
}

pub async fn find_wholesaler_by_user<C>(
    db: &C,
    user_id: i32,
) -> Result<Option<wholesaler::Model>, DbErr>
where
    C: ConnectionTrait,
{
    wholesaler::Entity::find()
        .filter(wholesaler::Column::UserId.eq(user_id))
        .one(db)
        .await
}

pub async fn list_wholesalers<C>(
    db: &C,
    status: Option<WholesalerStatus>,
    limit: u64,
    offset: u64,
) -> Result<(Vec<wholesaler::Model>, u64), DbErr>
where
    C: ConnectionTrait,
{
    let mut select = wholesaler::Entity::find();
    if let Some(status) = status {
        select = select.filter(wholesaler::Column::Status.eq(status));
    }
    let total = select.clone().count(db).await?;
    let items = select
        .order_by_desc(wholesaler::Column::CreatedAt)
        .order_by_desc(wholesaler::Column::Id)
        .limit(limit)
        .offset(offset)
        .all(db)
        .await?;
    Ok((items, total))
}

pub async fn insert_wholesaler<C>(
    db: &C,
    profile: wholesaler::ActiveModel,
) -> Result<wholesaler::Model, DbErr>
where
    C: ConnectionTrait,
{
    profile.insert(db).await
}

pub async fn update_wholesaler<C>(
    db: &C,
    profile: wholesaler::ActiveModel,
) -> Result<wholesaler::Model, DbErr>
where
    C: ConnectionTrait,
{
    profile.update(db).await
}

pub async fn delete_wholesaler<C>(db: &C, wholesaler_id: i32) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    let result = wholesaler::Entity::delete_by_id(wholesaler_id).exec(db).await?;
    Ok(result.rows_affected)
}

pub async fn find_documents<C>(
    db: &C,
    wholesaler_id: i32,
) -> Result<Option<wholesaler_document::Model>, DbErr>
where
    C: ConnectionTrait,
{
    wholesaler_document::Entity::find()
        .filter(wholesaler_document::Column::WholesalerId.eq(wholesaler_id))
        .one(db)
        .await
}

/// Plain insert. A second row for the same wholesaler violates the unique key.
pub async fn insert_documents<C>(
    db: &C,
    wholesaler_id: i32,
    urls: DocumentUrls,
    now: DateTimeWithTimeZone,
) -> Result<wholesaler_document::Model, DbErr>
where
    C: ConnectionTrait,
{
    let mut documents = blank_documents(wholesaler_id, now);
    documents.gst_certificate_url = Set(trim_to_option(urls.gst_certificate_url));
    documents.pan_card_url = Set(trim_to_option(urls.pan_card_url));
    documents.aadhar_card_url = Set(trim_to_option(urls.aadhar_card_url));
    documents.bank_statement_url = Set(trim_to_option(urls.bank_statement_url));
    documents.business_proof_url = Set(trim_to_option(urls.business_proof_url));
    documents.cancelled_cheque_url = Set(trim_to_option(urls.cancelled_cheque_url));
    documents.insert(db).await
}

/// Inserts an empty documents row unless one already exists. Returns the
/// number of rows inserted (0 or 1).
pub async fn ensure_documents<C>(
    db: &C,
    wholesaler_id: i32,
    now: DateTimeWithTimeZone,
) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    wholesaler_document::Entity::insert(blank_documents(wholesaler_id, now))
        .on_conflict(
            OnConflict::column(wholesaler_document::Column::WholesalerId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await
}

pub async fn update_document_statuses<C>(
    db: &C,
    documents: wholesaler_document::Model,
    changes: &[(DocumentKind, VerificationStatus)],
    now: DateTimeWithTimeZone,
) -> Result<wholesaler_document::Model, DbErr>
where
    C: ConnectionTrait,
{
    let mut active = documents.into_active_model();
    for (kind, status) in changes {
        kind.set_status(&mut active, *status);
    }
    active.updated_at = Set(now);
    active.update(db).await
}

fn blank_documents(wholesaler_id: i32, now: DateTimeWithTimeZone) -> wholesaler_document::ActiveModel {
    let mut documents = wholesaler_document::ActiveModel {
        wholesaler_id: Set(wholesaler_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    for kind in DocumentKind::ALL {
        kind.set_status(&mut documents, VerificationStatus::Pending);
    }
    documents
}
