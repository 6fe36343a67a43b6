//! Approximates a small S-shaped curve with circular arcs and prints them.
//!
//! Usage:
//! ```text
//! cargo run --example approximate            # threshold 0.01
//! cargo run --example approximate -- 0.001   # custom threshold
//! RUST_LOG=beziarc=debug cargo run --example approximate
//! ```

use beziarc::geometry::{AnchorPoint, BezierCurve};
use beziarc::math::{Point3, Vector3};
use beziarc::operations::{ApproximateArcs, FittedSpan, Length};
use beziarc::tessellation::{TessellateCurve, TessellationParams};

fn main() -> beziarc::Result<()> {
    // Default: WARN for everything, INFO for beziarc.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("beziarc=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let threshold = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<f64>().ok())
        .unwrap_or(0.01);

    let curve = BezierCurve::from_anchors(
        [
            AnchorPoint::free(Point3::new(0.0, 0.0, 0.0), Vector3::zeros(), Vector3::new(2.0, 3.0, 0.0)),
            AnchorPoint::connected(Point3::new(5.0, 0.0, 0.0), Vector3::new(-1.0, -2.0, 0.0)),
            AnchorPoint::free(Point3::new(9.0, 1.0, 0.0), Vector3::new(0.0, 2.0, 0.0), Vector3::zeros()),
        ],
        false,
    );

    let length = Length::of_curve().execute(&curve)?;
    let polyline = TessellateCurve::new(TessellationParams::default()).execute(&curve)?;
    println!("curve length {length:.4}, {} interpolated points", polyline.points.len());

    let result = ApproximateArcs::new(threshold).execute(&curve)?;
    for span in &result.spans {
        match span {
            FittedSpan::Arc(arc) => println!(
                "arc    t=[{:.4}, {:.4}] center=({:.4}, {:.4}) r={:.4} sweep={:.4} err={:.2e}",
                arc.t_start(),
                arc.t_end(),
                arc.center().x,
                arc.center().y,
                arc.radius(),
                arc.sweep(),
                arc.error(),
            ),
            FittedSpan::Unfit(unfit) => println!("unfit  t=[{:.4}, {:.4}]", unfit.t_start, unfit.t_end),
        }
    }
    for diagnostic in &result.diagnostics {
        println!("diagnostic: {diagnostic}");
    }
    Ok(())
}
