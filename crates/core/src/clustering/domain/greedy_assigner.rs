use crate::clustering::domain::face_cluster::FaceCluster;
use crate::clustering::domain::similarity::cosine_similarity;
use crate::shared::face::FaceInstance;

pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.6;

/// Single-pass first-fit greedy cluster assignment.
///
/// Each face, taken strictly in input order, joins the first existing
/// cluster (in creation order) whose **seed member** scores above the
/// threshold; otherwise it starts a new cluster. First match wins, not
/// best match, and the comparison target is always the seed rather than a
/// centroid or nearest member. That makes the pass O(n·k) with no
/// re-evaluation, at the cost of order sensitivity: permuting the input
/// can change the partition, which is why the batch pipeline serializes
/// detection into original photo order before assignment.
pub struct GreedyClusterAssigner {
    threshold: f32,
}

impl GreedyClusterAssigner {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Partitions `faces` into clusters, returned in creation order.
    ///
    /// New clusters get a generated placeholder name ("Person N") that the
    /// host can rename later.
    pub fn assign(&self, faces: Vec<FaceInstance>) -> Vec<FaceCluster> {
        let mut clusters: Vec<FaceCluster> = Vec::new();

        for face in faces {
            let matched = clusters.iter().position(|cluster| {
                cluster
                    .seed()
                    .is_some_and(|seed| {
                        cosine_similarity(&face.embedding, &seed.embedding) > self.threshold
                    })
            });

            match matched {
                Some(index) => clusters[index].members.push(face),
                None => {
                    let name = format!("Person {}", clusters.len() + 1);
                    clusters.push(FaceCluster::new(name, face));
                }
            }
        }

        clusters
    }
}

impl Default for GreedyClusterAssigner {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}
