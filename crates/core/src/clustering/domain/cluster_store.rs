use std::collections::HashSet;

use uuid::Uuid;

use crate::clustering::domain::face_cluster::FaceCluster;
use crate::shared::photo::Photo;

/// Owns the published cluster collection and its mutation operations.
///
/// All operations are synchronous and keyed by cluster id. Unknown ids are
/// no-ops rather than errors: callers cannot distinguish "nothing
/// happened" from "already correct", which is the intended contract for a
/// collection the UI edits optimistically.
#[derive(Debug, Default)]
pub struct ClusterStore {
    clusters: Vec<FaceCluster>,
}

impl ClusterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clusters(&self) -> &[FaceCluster] {
        &self.clusters
    }

    pub fn get(&self, cluster_id: Uuid) -> Option<&FaceCluster> {
        self.clusters.iter().find(|c| c.id == cluster_id)
    }

    /// Wholesale publication of a finished batch result.
    pub fn replace(&mut self, clusters: Vec<FaceCluster>) {
        self.clusters = clusters;
    }

    /// Replaces the display name of the cluster with `cluster_id`.
    pub fn rename(&mut self, cluster_id: Uuid, new_name: &str) {
        if let Some(cluster) = self.clusters.iter_mut().find(|c| c.id == cluster_id) {
            cluster.name = new_name.to_string();
        }
    }

    /// Moves every member of `source_id` to the tail of `target_id` and
    /// removes the source cluster entirely.
    ///
    /// The target's `representative_photo_id` is left as-is; whether a
    /// merge should refresh it is an unresolved product question, so the
    /// stale value is the contract.
    pub fn merge(&mut self, source_id: Uuid, target_id: Uuid) {
        if source_id == target_id {
            return;
        }
        let Some(source_index) = self.clusters.iter().position(|c| c.id == source_id) else {
            return;
        };
        let Some(target_index) = self.clusters.iter().position(|c| c.id == target_id) else {
            return;
        };

        let source = self.clusters.remove(source_index);
        // Removal shifts everything after the source down by one.
        let target_index = if target_index > source_index {
            target_index - 1
        } else {
            target_index
        };
        self.clusters[target_index].members.extend(source.members);
    }

    /// Every photo that contains at least one member of the cluster.
    ///
    /// Order follows `all_photos`, not member order, and each photo
    /// appears once even when several members share it. Unknown cluster
    /// ids yield an empty list.
    pub fn photos_for(&self, cluster_id: Uuid, all_photos: &[Photo]) -> Vec<Photo> {
        let Some(cluster) = self.get(cluster_id) else {
            return Vec::new();
        };

        let photo_ids: HashSet<&str> = cluster
            .members
            .iter()
            .map(|m| m.photo_id.as_str())
            .collect();
        all_photos
            .iter()
            .filter(|p| photo_ids.contains(p.id.as_str()))
            .cloned()
            .collect()
    }
}
