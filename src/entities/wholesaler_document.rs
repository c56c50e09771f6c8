use sea_orm::entity::prelude::*;

use super::wholesaler::VerificationStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "wholesaler_documents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub wholesaler_id: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub gst_certificate_url: Option<String>,
    pub gst_certificate_status: VerificationStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub pan_card_url: Option<String>,
    pub pan_card_status: VerificationStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub aadhar_card_url: Option<String>,
    pub aadhar_card_status: VerificationStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub bank_statement_url: Option<String>,
    pub bank_statement_status: VerificationStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub business_proof_url: Option<String>,
    pub business_proof_status: VerificationStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub cancelled_cheque_url: Option<String>,
    pub cancelled_cheque_status: VerificationStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::wholesaler::Entity",
        from = "Column::WholesalerId",
        to = "super::wholesaler::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Wholesaler,
}

impl Related<super::wholesaler::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wholesaler.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
