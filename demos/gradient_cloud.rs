use pointmob::{Color, PointCloud, PointColors};
use tracing_subscriber::EnvFilter;

fn main() -> pointmob::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // A spiral of 500 points
    let points: Vec<[f32; 3]> = (0..500)
        .map(|i| {
            let t = i as f32 * 0.05;
            [t.cos() * t * 0.1, t.sin() * t * 0.1, t * 0.01]
        })
        .collect();

    let mut cloud = PointCloud::new();
    cloud.set_points(&points);
    cloud.set_color_by_gradient(&[Color::BLUE, Color::TEAL, Color::YELLOW])?;
    println!("Spiral: {} points", cloud.len());

    cloud.add_points(
        &[[0.0, 0.0, 0.0]],
        PointColors::Uniform {
            color: Color::RED,
            opacity: None,
        },
    )?;

    // Keep only the points above the xy-plane's first quadrant
    cloud.filter_out(|p| p[0] < 0.0 || p[1] < 0.0);
    println!("After filter: {} points", cloud.len());

    let aabb = cloud.aabb();
    println!("Bounding box: min={:?}, max={:?}", aabb.min, aabb.max);
    println!("Midpoint: {:?}", cloud.point_from_proportion(0.5)?);
    Ok(())
}
