//! Restricts a raster scan to a rotated slit with a circular hole cut out.
//!
//! Run with: `cargo run --example scan_filter`

use ndarray::Array1;
use scanregions::units::degrees;
use scanregions::{Circle, PositionMap, Rectangle, RegionError};

fn main() -> Result<(), RegionError> {
    // 21×21 raster over [-5, 5]²
    let steps = 21;
    let (mut xs, mut ys) = (Vec::new(), Vec::new());
    for row in 0..steps {
        for col in 0..steps {
            xs.push(-5.0 + 10.0 * col as f64 / (steps - 1) as f64);
            ys.push(-5.0 + 10.0 * row as f64 / (steps - 1) as f64);
        }
    }
    let positions = PositionMap::from([
        ("stage_x", Array1::from(xs)),
        ("stage_y", Array1::from(ys)),
    ]);

    let slit = Rectangle::new("stage_x", "stage_y", -4.0, 4.0, -1.5, 1.5).with_angle(degrees(20.0));
    let hole = Circle::new("stage_x", "stage_y", 0.0, 0.0, 1.0);
    let area = (slit | Circle::new("stage_x", "stage_y", 3.5, 3.5, 1.2)) - hole;

    println!("Region tree:");
    area.print_tree(0);

    area.check_positions(&positions)?;
    let mask = area.mask(&positions)?;

    println!();
    for row in (0..steps).rev() {
        let line: String = (0..steps)
            .map(|col| if mask[row * steps + col] { '#' } else { '.' })
            .collect();
        println!("{line}");
    }
    println!(
        "\n{} of {} points selected",
        mask.iter().filter(|&&inside| inside).count(),
        mask.len()
    );

    Ok(())
}
