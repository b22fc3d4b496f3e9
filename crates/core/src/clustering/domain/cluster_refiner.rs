use crate::clustering::domain::face_cluster::FaceCluster;
use crate::shared::face::FaceInstance;
use crate::shared::photo::Photo;

/// Clusters smaller than this are treated as unmatched noise, not people.
pub const MIN_CLUSTER_SIZE: usize = 2;

/// Post-assignment pass: annotates each cluster with its representative
/// photo, then drops clusters too small to be statistically meaningful.
///
/// The representative is the photo of the highest-confidence member; ties
/// keep the first such member in insertion order. Relative cluster order
/// is preserved.
pub struct ClusterRefiner {
    min_cluster_size: usize,
}

impl ClusterRefiner {
    pub fn new(min_cluster_size: usize) -> Self {
        Self { min_cluster_size }
    }

    pub fn refine(&self, clusters: Vec<FaceCluster>, photos: &[Photo]) -> Vec<FaceCluster> {
        clusters
            .into_iter()
            .map(|mut cluster| {
                cluster.representative_photo_id = representative_photo_id(&cluster, photos);
                cluster
            })
            .filter(|cluster| cluster.members.len() >= self.min_cluster_size)
            .collect()
    }
}

impl Default for ClusterRefiner {
    fn default() -> Self {
        Self::new(MIN_CLUSTER_SIZE)
    }
}

/// Photo id of the best member, resolved against the supplied collection.
/// Unresolvable photos leave the representative unset.
fn representative_photo_id(cluster: &FaceCluster, photos: &[Photo]) -> Option<String> {
    let mut best: Option<&FaceInstance> = None;
    for member in &cluster.members {
        // Strictly greater, so the first member wins confidence ties.
        if best.map_or(true, |b| member.confidence > b.confidence) {
            best = Some(member);
        }
    }

    let best = best?;
    photos
        .iter()
        .find(|p| p.id == best.photo_id)
        .map(|p| p.id.clone())
}
