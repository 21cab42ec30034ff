//! Product Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::CategorySet;
use crate::validation::{
    self, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN, validate_category, validate_price,
};

/// Product entity (read-only view of a store row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Unit price in the store currency
    pub price: Decimal,
    /// Category name (one of the configured set)
    pub category: String,
    /// Public image URLs, the first one is the cover
    #[serde(default)]
    pub images: Vec<String>,
    /// Drives the default "newest" ordering
    pub created_at: DateTime<Utc>,
}

/// Create product payload, before image upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub category: String,
}

impl ProductDraft {
    /// Validate the draft against the configured category set
    pub fn validate(&self, categories: &CategorySet) -> Result<(), ValidationError> {
        validation::validate_required_text(&self.title, "title", MAX_TITLE_LEN)?;
        validation::validate_text(&self.description, "description", MAX_DESCRIPTION_LEN)?;
        validate_price(self.price)?;
        validate_category(&self.category, categories)
    }
}

/// Insert payload: a validated draft plus its uploaded image URLs
#[derive(Debug, Clone, Serialize)]
pub struct ProductInsert {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub images: Vec<String>,
}

impl ProductInsert {
    pub fn from_draft(draft: ProductDraft, images: Vec<String>) -> Self {
        Self {
            title: draft.title,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            images,
        }
    }
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl ProductPatch {
    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.images.is_none()
    }

    /// Validate the fields that are present
    pub fn validate(&self, categories: &CategorySet) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validation::validate_required_text(title, "title", MAX_TITLE_LEN)?;
        }
        if let Some(description) = &self.description {
            validation::validate_text(description, "description", MAX_DESCRIPTION_LEN)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(category) = &self.category {
            validate_category(category, categories)?;
        }
        Ok(())
    }
}

/// Raw image payload selected for upload
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Original filename; the extension decides whether the payload is accepted
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> CategorySet {
        CategorySet::new(["Mates", "Termos", "Accesorios"])
    }

    fn draft() -> ProductDraft {
        ProductDraft {
            title: "Termo Stanley 1.2L".to_string(),
            description: "Acero inoxidable".to_string(),
            price: Decimal::from(45000),
            category: "Termos".to_string(),
        }
    }

    #[test]
    fn test_valid_draft() {
        assert!(draft().validate(&categories()).is_ok());
    }

    #[test]
    fn test_draft_rejects_unknown_category() {
        let mut bad = draft();
        bad.category = "Vasos".to_string();
        assert!(bad.validate(&categories()).is_err());
    }

    #[test]
    fn test_draft_rejects_non_positive_price() {
        let mut bad = draft();
        bad.price = Decimal::ZERO;
        assert!(bad.validate(&categories()).is_err());
    }

    #[test]
    fn test_patch_skips_absent_fields() {
        let patch = ProductPatch {
            price: Some(Decimal::from(100)),
            ..ProductPatch::default()
        };
        assert!(patch.validate(&categories()).is_ok());
        assert!(!patch.is_empty());
        assert!(ProductPatch::default().is_empty());
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let patch = ProductPatch {
            title: Some("Mate Imperial".to_string()),
            ..ProductPatch::default()
        };
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, "{\"title\":\"Mate Imperial\"}");
    }
}
