use rand::rngs::StdRng;
use rand::SeedableRng;
use track_forge::prelude::*;
use track_forge_examples::{init_tracing, render_track_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut rng = StdRng::seed_from_u64(7);

    // Roll the scatter configuration the way the game does per circuit.
    let scatter = TreeScatterConfig::randomized(&mut rng);
    let config = TrackConfig::default().with_scatter(scatter);

    let (track, report) = Track::generate(config, &mut rng)?;
    println!(
        "generated {} points at score {:.0}, rendering...",
        track.points().len(),
        report.quality.score
    );

    render_track_to_png(&track, &RenderConfig::default(), "render-track.png")?;
    println!("wrote render-track.png");

    Ok(())
}
