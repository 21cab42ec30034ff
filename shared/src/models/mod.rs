//! Domain models

mod category;
mod contact;
mod product;

pub use category::CategorySet;
pub use contact::ContactMessage;
pub use product::{ImageUpload, Product, ProductDraft, ProductInsert, ProductPatch};
