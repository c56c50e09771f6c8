//! Wholesaler business profile. One row per wholesaler-role user.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::user::Role;

/// Status shared by a profile and each of its document slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "under_review")]
    UnderReview,
    #[sea_orm(string_value = "verified")]
    Verified,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Profile status. `ProfilePending` only exists for self-signup profiles that
/// have not submitted their documents yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum WholesalerStatus {
    #[sea_orm(string_value = "profile_pending")]
    ProfilePending,
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "under_review")]
    UnderReview,
    #[sea_orm(string_value = "verified")]
    Verified,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl WholesalerStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProfilePending => "profile_pending",
            Self::Pending => "pending",
            Self::UnderReview => "under_review",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }

    pub fn is_verified(self) -> bool {
        self == Self::Verified
    }
}

impl From<VerificationStatus> for WholesalerStatus {
    fn from(status: VerificationStatus) -> Self {
        match status {
            VerificationStatus::Pending => Self::Pending,
            VerificationStatus::UnderReview => Self::UnderReview,
            VerificationStatus::Verified => Self::Verified,
            VerificationStatus::Rejected => Self::Rejected,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "wholesalers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
    pub business_name: String,
    pub business_category_id: i32,
    pub owner_name: Option<String>,
    pub phone_number: String,
    pub alternate_phone_number: Option<String>,
    pub email: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub website_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub business_address: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub billing_address: Option<String>,
    pub gst_number: Option<String>,
    pub pan_number: Option<String>,
    pub aadhar_number: Option<String>,
    pub msme_number: Option<String>,
    pub years_in_business: Option<i32>,
    pub number_of_employees: Option<i32>,
    #[sea_orm(column_type = "Double", nullable)]
    pub annual_turnover: Option<f64>,
    pub trade_license_number: Option<String>,
    pub status: WholesalerStatus,
    #[sea_orm(column_type = "Double", nullable)]
    pub credit_limit: Option<f64>,
    pub admin_note: Option<String>,
    pub created_by_id: Option<i32>,
    pub created_by_role: Option<Role>,
    pub verified_by_id: Option<i32>,
    pub verified_by_role: Option<Role>,
    pub verified_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::business_category::Entity",
        from = "Column::BusinessCategoryId",
        to = "super::business_category::Column::Id"
    )]
    BusinessCategory,
    #[sea_orm(has_one = "super::wholesaler_document::Entity")]
    WholesalerDocument,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::business_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BusinessCategory.def()
    }
}

impl Related<super::wholesaler_document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WholesalerDocument.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
