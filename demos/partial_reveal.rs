use pointmob::{Color, Mutation, PointCloud, PointCloudGroup};
use tracing_subscriber::EnvFilter;

fn main() -> pointmob::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let line = |y: f32| -> Vec<[f32; 3]> { (0..100).map(|i| [i as f32 * 0.1, y, 0.0]).collect() };
    let mut top = PointCloud::from_points(&line(1.0));
    top.set_color(Color::ORANGE, None)?;
    let mut bottom = PointCloud::from_points(&line(-1.0));
    bottom.set_color(Color::PURPLE, None)?;

    let mut group = PointCloudGroup::new([top, bottom]);
    group.ingest_submobjects();
    group.sort_points_by_x();

    // Reveal the merged cloud in five steps, the way an animation would
    let mut frame = PointCloud::new();
    frame.on_mutation(|mutation, cloud| {
        if mutation == Mutation::Partial {
            println!("frame now shows {} points", cloud.len());
        }
    });
    for step in 1..=5 {
        frame.pointwise_become_partial(&group, 0.0, step as f64 / 5.0)?;
    }
    Ok(())
}
