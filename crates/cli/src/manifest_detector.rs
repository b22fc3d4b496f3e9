use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use facegroup_core::detection::domain::face_detector::{Detection, FaceDetector};
use facegroup_core::shared::bounding_box::BoundingBox;
use facegroup_core::shared::photo::Photo;

/// On-disk manifest: the photo collection plus precomputed detections.
///
/// This plays the detector role for the CLI, standing in for whatever
/// inference backend produced the sidecar data. A face listed without an
/// embedding is surfaced as `embedding: None` and left for the engine to
/// drop.
#[derive(Debug, Deserialize)]
pub struct Manifest {
    pub photos: Vec<ManifestPhoto>,
}

#[derive(Debug, Deserialize)]
pub struct ManifestPhoto {
    pub id: String,
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub faces: Vec<ManifestFace>,
}

#[derive(Debug, Deserialize)]
pub struct ManifestFace {
    /// Normalized `[x, y, width, height]`.
    #[serde(rename = "box")]
    pub bounding_box: [f32; 4],
    pub confidence: f32,
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("cannot read manifest {}: {e}", path.display()))?;
        let manifest: Manifest = serde_json::from_str(&raw)
            .map_err(|e| format!("invalid manifest {}: {e}", path.display()))?;
        Ok(manifest)
    }

    /// The ordered photo collection the engine runs over.
    pub fn photos(&self) -> Vec<Photo> {
        self.photos
            .iter()
            .map(|p| {
                Photo::new(
                    p.id.clone(),
                    p.path.clone().unwrap_or_else(|| PathBuf::from(&p.id)),
                )
            })
            .collect()
    }
}

/// `FaceDetector` backed by manifest sidecar data, keyed by photo id.
pub struct ManifestDetector {
    detections: HashMap<String, Vec<Detection>>,
}

impl ManifestDetector {
    pub fn new(manifest: &Manifest) -> Self {
        let detections = manifest
            .photos
            .iter()
            .map(|photo| {
                let faces = photo
                    .faces
                    .iter()
                    .map(|face| {
                        let [x, y, w, h] = face.bounding_box;
                        Detection {
                            bounding_box: BoundingBox::new(x, y, w, h).clamped_unit(),
                            confidence: face.confidence,
                            embedding: face.embedding.clone(),
                        }
                    })
                    .collect();
                (photo.id.clone(), faces)
            })
            .collect();
        Self { detections }
    }
}

impl FaceDetector for ManifestDetector {
    fn detect(&mut self, photo: &Photo) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        Ok(self.detections.get(&photo.id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
        "photos": [
            {
                "id": "p1",
                "path": "img/p1.jpg",
                "faces": [
                    {"box": [0.1, 0.2, 0.3, 0.4], "confidence": 0.9, "embedding": [1.0, 0.0]},
                    {"box": [0.5, 0.5, 0.2, 0.2], "confidence": 0.7}
                ]
            },
            {"id": "p2"}
        ]
    }"#;

    fn write_manifest(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_parses_photos_in_order() {
        let file = write_manifest(SAMPLE);
        let manifest = Manifest::load(file.path()).unwrap();
        let photos = manifest.photos();
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].id, "p1");
        assert_eq!(photos[0].path, PathBuf::from("img/p1.jpg"));
        // Missing path falls back to the id.
        assert_eq!(photos[1].path, PathBuf::from("p2"));
    }

    #[test]
    fn test_detect_returns_faces_for_known_photo() {
        let file = write_manifest(SAMPLE);
        let manifest = Manifest::load(file.path()).unwrap();
        let mut detector = ManifestDetector::new(&manifest);

        let faces = detector.detect(&Photo::new("p1", "img/p1.jpg")).unwrap();
        assert_eq!(faces.len(), 2);
        assert_eq!(faces[0].embedding.as_deref(), Some(&[1.0, 0.0][..]));
        // Embedding omitted in the manifest surfaces as None.
        assert!(faces[1].embedding.is_none());
    }

    #[test]
    fn test_detect_unknown_photo_is_empty() {
        let file = write_manifest(SAMPLE);
        let manifest = Manifest::load(file.path()).unwrap();
        let mut detector = ManifestDetector::new(&manifest);
        assert!(detector
            .detect(&Photo::new("unknown", "x.jpg"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_faceless_photo_yields_no_detections() {
        let file = write_manifest(SAMPLE);
        let manifest = Manifest::load(file.path()).unwrap();
        let mut detector = ManifestDetector::new(&manifest);
        assert!(detector
            .detect(&Photo::new("p2", "p2"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let file = write_manifest("{not json");
        assert!(Manifest::load(file.path()).is_err());
    }

    #[test]
    fn test_out_of_range_boxes_are_clamped() {
        let file = write_manifest(
            r#"{"photos": [{"id": "p1", "faces": [
                {"box": [-0.1, 0.0, 0.5, 1.5], "confidence": 0.9, "embedding": [1.0]}
            ]}]}"#,
        );
        let manifest = Manifest::load(file.path()).unwrap();
        let mut detector = ManifestDetector::new(&manifest);
        let faces = detector.detect(&Photo::new("p1", "p1")).unwrap();
        let bbox = faces[0].bounding_box;
        assert!(bbox.x >= 0.0);
        assert!(bbox.y + bbox.height <= 1.0);
    }
}
