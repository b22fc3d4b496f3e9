use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::Duration;

use clap::Parser;

use facegroup_core::clustering::domain::cluster_refiner::MIN_CLUSTER_SIZE;
use facegroup_core::clustering::domain::greedy_assigner::DEFAULT_SIMILARITY_THRESHOLD;
use facegroup_core::pipeline::cluster_engine::ClusterEngine;
use facegroup_core::shared::photo::Photo;

mod manifest_detector;

use manifest_detector::{Manifest, ManifestDetector};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Group the people in a photo collection by face similarity.
#[derive(Parser)]
#[command(name = "facegroup")]
struct Cli {
    /// Manifest JSON listing photos and their precomputed face detections.
    manifest: PathBuf,

    /// Similarity score a face must exceed to join an existing group.
    #[arg(long, default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
    threshold: f32,

    /// Minimum faces required for a group to survive noise filtering.
    #[arg(long, default_value_t = MIN_CLUSTER_SIZE)]
    min_cluster_size: usize,

    /// Print every member face of each group, not just the summary.
    #[arg(long)]
    show_members: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let manifest = Manifest::load(&cli.manifest)?;
    let photos = manifest.photos();
    let detector = ManifestDetector::new(&manifest);

    let mut engine = ClusterEngine::with_settings(cli.threshold, cli.min_cluster_size);
    engine.start(Box::new(detector), photos.clone())?;

    while engine.is_processing() {
        engine.poll();
        eprint!("\rClustering... {:3.0}%", engine.progress() * 100.0);
        thread::sleep(POLL_INTERVAL);
    }
    eprintln!();

    if engine.dropped_detections() > 0 {
        log::warn!(
            "{} detections had no embedding and were skipped",
            engine.dropped_detections()
        );
    }

    print_groups(&engine, &photos, cli.show_members);
    Ok(())
}

fn print_groups(engine: &ClusterEngine, photos: &[Photo], show_members: bool) {
    if engine.clusters().is_empty() {
        println!("No people found (groups need at least two matching faces).");
        return;
    }

    for cluster in engine.clusters() {
        let group_photos = engine.photos_for_cluster(cluster.id, photos);
        println!(
            "{}: {} faces across {} photos{}",
            cluster.name,
            cluster.members.len(),
            group_photos.len(),
            match &cluster.representative_photo_id {
                Some(id) => format!(" (best shot: {id})"),
                None => String::new(),
            }
        );

        if show_members {
            for member in &cluster.members {
                println!(
                    "  {} confidence {:.2} at ({:.2}, {:.2})",
                    member.photo_id,
                    member.confidence,
                    member.bounding_box.x,
                    member.bounding_box.y
                );
            }
        }
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.manifest.exists() {
        return Err(format!("Manifest not found: {}", cli.manifest.display()).into());
    }
    if !(-1.0..=1.0).contains(&cli.threshold) {
        return Err(format!(
            "Threshold must be between -1.0 and 1.0, got {}",
            cli.threshold
        )
        .into());
    }
    if cli.min_cluster_size == 0 {
        return Err("Minimum cluster size must be at least 1".into());
    }
    Ok(())
}
