use uuid::Uuid;

use crate::shared::face::FaceInstance;

/// One inferred person: an ordered group of face instances.
///
/// `members` keeps insertion order; assignment compares new faces against
/// `members[0]` (the seed), and merges append at the tail.
#[derive(Clone, Debug)]
pub struct FaceCluster {
    pub id: Uuid,
    pub name: String,
    pub members: Vec<FaceInstance>,
    /// Derived, not authoritative: set by the refiner to the photo of the
    /// highest-confidence member. Left stale by `merge` on purpose.
    pub representative_photo_id: Option<String>,
}

impl FaceCluster {
    /// Creates a cluster seeded with its first member.
    pub fn new(name: impl Into<String>, seed: FaceInstance) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            members: vec![seed],
            representative_photo_id: None,
        }
    }

    /// The member every assignment comparison runs against.
    pub fn seed(&self) -> Option<&FaceInstance> {
        self.members.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::bounding_box::BoundingBox;

    fn face() -> FaceInstance {
        FaceInstance::new(
            "p1",
            BoundingBox::new(0.1, 0.1, 0.2, 0.2),
            vec![1.0, 0.0],
            0.9,
        )
    }

    #[test]
    fn test_new_seeds_members_with_single_face() {
        let seed = face();
        let seed_id = seed.id;
        let cluster = FaceCluster::new("Person 1", seed);
        assert_eq!(cluster.members.len(), 1);
        assert_eq!(cluster.seed().unwrap().id, seed_id);
        assert_eq!(cluster.name, "Person 1");
        assert!(cluster.representative_photo_id.is_none());
    }

    #[test]
    fn test_ids_are_unique_across_clusters() {
        let a = FaceCluster::new("Person 1", face());
        let b = FaceCluster::new("Person 2", face());
        assert_ne!(a.id, b.id);
    }
}
