//! The view synchronizer.
//!
//! [`ViewSynchronizer`] owns the last-fetched snapshot of dinosaurs and the
//! HTML rendered from it. Every operation persists through the
//! [`RecordStore`], then re-fetches the whole collection and re-renders
//! from scratch.
//!
//! Operations are independent chains with no mutual exclusion between
//! them: when two overlap, whichever final `list` resolves last decides
//! the snapshot. The snapshot lock is only held for synchronous sections,
//! never across a store request.

use std::sync::Arc;

use dinodex_core::error::{CoreError, RequestError};
use dinodex_core::model::{find_dinosaur, Dinosaur, NewDinosaur, NewFeature};
use dinodex_core::store::RecordStore;
use tokio::sync::RwLock;

use crate::render;

/// The result of a render: the snapshot and the list HTML built from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedView {
    pub entities: Vec<Dinosaur>,
    pub html: String,
}

pub struct ViewSynchronizer {
    store: Arc<dyn RecordStore>,
    view: RwLock<RenderedView>,
}

impl ViewSynchronizer {
    /// Create a synchronizer with an empty snapshot.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            view: RwLock::new(RenderedView {
                entities: Vec::new(),
                html: render::render_list(&[]),
            }),
        }
    }

    /// The snapshot and HTML of the most recent render.
    pub async fn current_view(&self) -> RenderedView {
        self.view.read().await.clone()
    }

    pub async fn current_entities(&self) -> Vec<Dinosaur> {
        self.view.read().await.entities.clone()
    }

    /// Create a feature-less dinosaur, then re-fetch and re-render.
    ///
    /// The create response is discarded; the displayed record comes from
    /// the following `list`.
    pub async fn create_entity(&self, input: NewDinosaur) -> Result<RenderedView, CoreError> {
        let created = self
            .store
            .create(&input)
            .await
            .map_err(|e| request_failed("create", e))?;
        tracing::info!(id = %created.id, name = %created.name, "Dinosaur created");

        self.refresh_all().await
    }

    /// Fetch the whole collection and re-render.
    pub async fn refresh_all(&self) -> Result<RenderedView, CoreError> {
        let entities = self
            .store
            .list()
            .await
            .map_err(|e| request_failed("list", e))?;
        Ok(self.render(entities).await)
    }

    /// Delete a dinosaur (and its features), then re-fetch and re-render.
    pub async fn remove_entity(&self, id: &str) -> Result<RenderedView, CoreError> {
        self.store
            .delete(id)
            .await
            .map_err(|e| request_failed("delete", e))?;
        tracing::info!(id, "Dinosaur deleted");

        self.refresh_all().await
    }

    /// Append a feature to a dinosaur in the snapshot, persist the whole
    /// record, then re-fetch and re-render.
    ///
    /// If the dinosaur is not in the snapshot nothing is mutated and no
    /// request is made; [`CoreError::NotFound`] is returned.
    pub async fn add_feature_to(
        &self,
        entity_id: &str,
        input: NewFeature,
    ) -> Result<RenderedView, CoreError> {
        let (original, payload) = {
            let mut view = self.view.write().await;
            let Some(dinosaur) = find_dinosaur(&mut view.entities, entity_id) else {
                tracing::warn!(entity_id, "Add feature skipped: dinosaur not in current view");
                return Err(CoreError::NotFound {
                    entity: "Dinosaur",
                    id: entity_id.to_string(),
                });
            };
            let original = dinosaur.clone();
            dinosaur.features.push(input.into_feature());
            (original, dinosaur.clone())
        };

        self.persist_edit(original, &payload).await?;
        tracing::info!(
            id = %payload.id,
            features = payload.features.len(),
            "Feature added"
        );

        self.refresh_all().await
    }

    /// Remove a feature from a dinosaur in the snapshot, persist the whole
    /// record, then re-fetch and re-render.
    ///
    /// If either the dinosaur or the feature is not in the snapshot nothing
    /// is mutated and no request is made.
    pub async fn remove_feature_from(
        &self,
        entity_id: &str,
        feature_id: &str,
    ) -> Result<RenderedView, CoreError> {
        let (original, payload) = {
            let mut view = self.view.write().await;
            let Some(dinosaur) = find_dinosaur(&mut view.entities, entity_id) else {
                tracing::warn!(entity_id, "Remove feature skipped: dinosaur not in current view");
                return Err(CoreError::NotFound {
                    entity: "Dinosaur",
                    id: entity_id.to_string(),
                });
            };
            let original = dinosaur.clone();
            if dinosaur.remove_feature(feature_id).is_none() {
                tracing::warn!(entity_id, feature_id, "Remove feature skipped: feature not found");
                return Err(CoreError::NotFound {
                    entity: "Feature",
                    id: feature_id.to_string(),
                });
            }
            (original, dinosaur.clone())
        };

        self.persist_edit(original, &payload).await?;
        tracing::info!(id = %payload.id, feature_id, "Feature removed");

        self.refresh_all().await
    }

    /// Send a locally edited record to the store.
    ///
    /// If the store rejects it, the edit is taken back out of the snapshot
    /// so a later update of the same record cannot resend it.
    async fn persist_edit(&self, original: Dinosaur, edited: &Dinosaur) -> Result<(), CoreError> {
        match self.store.update(edited).await {
            Ok(_) => Ok(()),
            Err(e) => {
                self.revert_edit(original, edited).await;
                Err(request_failed("update", e))
            }
        }
    }

    /// Put `original` back, unless a newer `list` already replaced `edited`.
    async fn revert_edit(&self, original: Dinosaur, edited: &Dinosaur) {
        let mut view = self.view.write().await;
        if let Some(current) = find_dinosaur(&mut view.entities, &original.id) {
            if *current == *edited {
                *current = original;
            }
        }
    }

    /// Fetch one dinosaur straight from the store, leaving the view as is.
    pub async fn fetch_one(&self, id: &str) -> Result<Dinosaur, CoreError> {
        self.store
            .get(id)
            .await
            .map_err(|e| request_failed("get", e))
    }

    /// Replace the snapshot and rebuild the list HTML from scratch.
    pub async fn render(&self, entities: Vec<Dinosaur>) -> RenderedView {
        let html = render::render_list(&entities);
        tracing::debug!(
            dinosaurs = entities.len(),
            features = entities.iter().map(|d| d.features.len()).sum::<usize>(),
            "Rendered dinosaur list"
        );

        let rendered = RenderedView { entities, html };
        *self.view.write().await = rendered.clone();
        rendered
    }
}

fn request_failed(action: &'static str, err: RequestError) -> CoreError {
    tracing::error!(action, error = %err, "Record store request failed");
    CoreError::Request(err)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
