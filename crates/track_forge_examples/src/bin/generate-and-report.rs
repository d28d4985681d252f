use rand::rngs::StdRng;
use rand::SeedableRng;
use track_forge::prelude::*;
use track_forge_examples::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Reproducible RNG; change the seed for a different circuit.
    let mut rng = StdRng::seed_from_u64(42);

    let config = TrackConfig::default();
    let (track, report) = Track::generate(config, &mut rng)?;

    let quality = &report.quality;
    println!("circuit points:     {}", track.points().len());
    println!("total length:       {:.1}", quality.total_length);
    println!(
        "segment lengths:    min {:.2} / mean {:.2} / max {:.2}",
        quality.min_segment_length, quality.mean_segment_length, quality.max_segment_length
    );
    println!("sharp transitions:  {}", quality.sharp_transitions);
    println!(
        "quality score:      {:.0} ({} attempts, target {})",
        quality.score,
        report.attempts,
        if report.met_target { "met" } else { "missed" }
    );
    println!("checkpoints:        {}", track.checkpoints().len());
    println!("trees:              {}", track.trees().len());

    for slot in 0..4 {
        let p = track.start_position(slot);
        println!("grid slot {slot}:        ({:.1}, {:.1})", p.x, p.y);
    }

    Ok(())
}
