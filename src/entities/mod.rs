pub mod business_category;
pub mod prelude;
pub mod user;
pub mod wholesaler;
pub mod wholesaler_document;
