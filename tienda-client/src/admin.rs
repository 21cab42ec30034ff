//! Admin product service
//!
//! Create/update/delete products on top of the write seams. Image uploads
//! happen before the row write; when a later step fails, every object
//! already uploaded is removed again.

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{info, warn};
use uuid::Uuid;

use shared::models::{CategorySet, ImageUpload, Product, ProductDraft, ProductInsert, ProductPatch};

use crate::storage::prepare_image;
use crate::{ClientError, ClientResult};

/// Write seam over the hosted relational store
#[async_trait]
pub trait ProductWriter: Send + Sync {
    async fn insert_product(&self, row: &ProductInsert) -> ClientResult<Product>;
    async fn update_product(&self, id: i64, patch: &ProductPatch) -> ClientResult<Product>;
    async fn delete_product(&self, id: i64) -> ClientResult<()>;
}

/// Write seam over the hosted object storage
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload bytes, returning the object's public URL
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> ClientResult<String>;
    async fn remove(&self, path: &str) -> ClientResult<()>;
}

/// Admin service for product mutations
///
/// Callers are expected to hold an authenticated session; the injected
/// writer and object store carry its token.
pub struct ProductAdmin<W, O> {
    writer: W,
    objects: O,
    categories: CategorySet,
}

/// Images are re-encoded as JPEG, so objects are always named `<uuid>.jpg`
fn object_path() -> String {
    format!("{}.jpg", Uuid::new_v4())
}

impl<W, O> ProductAdmin<W, O>
where
    W: ProductWriter,
    O: ObjectStore,
{
    /// Create an admin service over the write seams
    pub fn new(writer: W, objects: O, categories: CategorySet) -> Self {
        Self {
            writer,
            objects,
            categories,
        }
    }

    /// Create a product: validate, upload its images, insert the row
    ///
    /// On insert failure the uploaded objects are removed again.
    pub async fn create_product(
        &self,
        draft: ProductDraft,
        images: Vec<ImageUpload>,
    ) -> ClientResult<Product> {
        draft.validate(&self.categories)?;
        if images.is_empty() {
            return Err(ClientError::Validation(
                "at least one image is required".into(),
            ));
        }

        let uploaded = self.upload_images(&images).await?;
        let urls = uploaded.iter().map(|(_, url)| url.clone()).collect();

        match self.writer.insert_product(&ProductInsert::from_draft(draft, urls)).await {
            Ok(product) => {
                info!(id = product.id, title = %product.title, "Product created");
                Ok(product)
            }
            Err(e) => {
                self.remove_uploaded(&uploaded).await;
                Err(e)
            }
        }
    }

    /// Update a product, optionally replacing its images
    ///
    /// On update failure the newly uploaded objects are removed again.
    pub async fn update_product(
        &self,
        id: i64,
        mut patch: ProductPatch,
        new_images: Vec<ImageUpload>,
    ) -> ClientResult<Product> {
        patch.validate(&self.categories)?;
        if patch.is_empty() && new_images.is_empty() {
            return Err(ClientError::Validation("nothing to update".into()));
        }

        let uploaded = self.upload_images(&new_images).await?;
        if !uploaded.is_empty() {
            patch.images = Some(uploaded.iter().map(|(_, url)| url.clone()).collect());
        }

        match self.writer.update_product(id, &patch).await {
            Ok(product) => {
                info!(id, "Product updated");
                Ok(product)
            }
            Err(e) => {
                self.remove_uploaded(&uploaded).await;
                Err(e)
            }
        }
    }

    /// Delete a product row
    pub async fn delete_product(&self, id: i64) -> ClientResult<()> {
        self.writer.delete_product(id).await?;
        info!(id, "Product deleted");
        Ok(())
    }

    /// Validate, re-encode and upload every image, returning `(path, url)`
    /// pairs. A failed upload removes the ones that already succeeded.
    async fn upload_images(&self, images: &[ImageUpload]) -> ClientResult<Vec<(String, String)>> {
        // Validate every payload before touching the network
        let prepared: Vec<(String, Vec<u8>)> = images
            .iter()
            .map(|image| Ok((object_path(), prepare_image(image)?)))
            .collect::<ClientResult<_>>()?;

        let results = join_all(
            prepared
                .iter()
                .map(|(path, bytes)| self.objects.upload(path, bytes.clone())),
        )
        .await;

        let mut uploaded = Vec::new();
        let mut failure = None;
        for ((path, _), result) in prepared.into_iter().zip(results) {
            match result {
                Ok(url) => uploaded.push((path, url)),
                Err(e) => failure = Some(e),
            }
        }

        if let Some(e) = failure {
            self.remove_uploaded(&uploaded).await;
            return Err(e);
        }
        Ok(uploaded)
    }

    /// Best-effort rollback of uploaded objects
    async fn remove_uploaded(&self, uploaded: &[(String, String)]) {
        for (path, _) in uploaded {
            if let Err(e) = self.objects.remove(path).await {
                warn!(%path, error = %e, "Failed to remove uploaded object during rollback");
            }
        }
    }
}
