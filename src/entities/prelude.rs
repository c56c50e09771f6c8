#![allow(unused_imports)]

pub use super::business_category::Entity as BusinessCategory;
pub use super::user::Entity as User;
pub use super::wholesaler::Entity as Wholesaler;
pub use super::wholesaler_document::Entity as WholesalerDocument;
