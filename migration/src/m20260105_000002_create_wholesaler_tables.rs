use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::Expr;

use crate::m20260105_000001_create_account_tables::{BusinessCategories, Users};

const VERIFICATION_STATUSES: [&str; 4] = ["pending", "under_review", "verified", "rejected"];
const PROFILE_STATUSES: [&str; 5] = [
    "profile_pending",
    "pending",
    "under_review",
    "verified",
    "rejected",
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Wholesalers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Wholesalers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Wholesalers::UserId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Wholesalers::BusinessName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Wholesalers::BusinessCategoryId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Wholesalers::OwnerName).string_len(255).null())
                    .col(
                        ColumnDef::new(Wholesalers::PhoneNumber)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Wholesalers::AlternatePhoneNumber)
                            .string_len(16)
                            .null(),
                    )
                    .col(ColumnDef::new(Wholesalers::Email).string_len(255).null())
                    .col(ColumnDef::new(Wholesalers::WebsiteUrl).text().null())
                    .col(ColumnDef::new(Wholesalers::BusinessAddress).text().null())
                    .col(ColumnDef::new(Wholesalers::BillingAddress).text().null())
                    .col(ColumnDef::new(Wholesalers::GstNumber).string_len(32).null())
                    .col(ColumnDef::new(Wholesalers::PanNumber).string_len(32).null())
                    .col(ColumnDef::new(Wholesalers::AadharNumber).string_len(32).null())
                    .col(ColumnDef::new(Wholesalers::MsmeNumber).string_len(32).null())
                    .col(ColumnDef::new(Wholesalers::YearsInBusiness).integer().null())
                    .col(ColumnDef::new(Wholesalers::NumberOfEmployees).integer().null())
                    .col(ColumnDef::new(Wholesalers::AnnualTurnover).double().null())
                    .col(
                        ColumnDef::new(Wholesalers::TradeLicenseNumber)
                            .string_len(64)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Wholesalers::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending")
                            .check(Expr::col(Wholesalers::Status).is_in(PROFILE_STATUSES)),
                    )
                    .col(ColumnDef::new(Wholesalers::CreditLimit).double().null())
                    .col(ColumnDef::new(Wholesalers::AdminNote).string_len(500).null())
                    .col(ColumnDef::new(Wholesalers::CreatedById).integer().null())
                    .col(ColumnDef::new(Wholesalers::CreatedByRole).string_len(16).null())
                    .col(ColumnDef::new(Wholesalers::VerifiedById).integer().null())
                    .col(ColumnDef::new(Wholesalers::VerifiedByRole).string_len(16).null())
                    .col(
                        ColumnDef::new(Wholesalers::VerifiedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Wholesalers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Wholesalers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wholesalers_user")
                            .from(Wholesalers::Table, Wholesalers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wholesalers_business_category")
                            .from(Wholesalers::Table, Wholesalers::BusinessCategoryId)
                            .to(BusinessCategories::Table, BusinessCategories::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_wholesalers_status")
                    .table(Wholesalers::Table)
                    .col(Wholesalers::Status)
                    .col(Wholesalers::CreatedAt)
                    .to_owned(),
            )
            .await?;

        let mut documents = Table::create();
        documents
            .table(WholesalerDocuments::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(WholesalerDocuments::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(WholesalerDocuments::WholesalerId)
                    .integer()
                    .not_null()
                    .unique_key(),
            );

        for (url, status) in WholesalerDocuments::SLOTS {
            documents
                .col(ColumnDef::new(url).text().null())
                .col(
                    ColumnDef::new(status)
                        .string_len(20)
                        .not_null()
                        .default("pending")
                        .check(Expr::col(status).is_in(VERIFICATION_STATUSES)),
                );
        }

        documents
            .col(
                ColumnDef::new(WholesalerDocuments::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .col(
                ColumnDef::new(WholesalerDocuments::UpdatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_wholesaler_documents_wholesaler")
                    .from(WholesalerDocuments::Table, WholesalerDocuments::WholesalerId)
                    .to(Wholesalers::Table, Wholesalers::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .on_update(ForeignKeyAction::Cascade),
            );

        manager.create_table(documents.to_owned()).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WholesalerDocuments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Wholesalers::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Wholesalers {
    Table,
    Id,
    UserId,
    BusinessName,
    BusinessCategoryId,
    OwnerName,
    PhoneNumber,
    AlternatePhoneNumber,
    Email,
    WebsiteUrl,
    BusinessAddress,
    BillingAddress,
    GstNumber,
    PanNumber,
    AadharNumber,
    MsmeNumber,
    YearsInBusiness,
    NumberOfEmployees,
    AnnualTurnover,
    TradeLicenseNumber,
    Status,
    CreditLimit,
    AdminNote,
    CreatedById,
    CreatedByRole,
    VerifiedById,
    VerifiedByRole,
    VerifiedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum WholesalerDocuments {
    Table,
    Id,
    WholesalerId,
    GstCertificateUrl,
    GstCertificateStatus,
    PanCardUrl,
    PanCardStatus,
    AadharCardUrl,
    AadharCardStatus,
    BankStatementUrl,
    BankStatementStatus,
    BusinessProofUrl,
    BusinessProofStatus,
    CancelledChequeUrl,
    CancelledChequeStatus,
    CreatedAt,
    UpdatedAt,
}

impl WholesalerDocuments {
    const SLOTS: [(Self, Self); 6] = [
        (Self::GstCertificateUrl, Self::GstCertificateStatus),
        (Self::PanCardUrl, Self::PanCardStatus),
        (Self::AadharCardUrl, Self::AadharCardStatus),
        (Self::BankStatementUrl, Self::BankStatementStatus),
        (Self::BusinessProofUrl, Self::BusinessProofStatus),
        (Self::CancelledChequeUrl, Self::CancelledChequeStatus),
    ];
}
