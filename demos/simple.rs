use sight_compass::{RotationSample, compute_orientation, to_heading_degrees};

fn main() {
    // this would normally come from the platform's rotation-vector sensor
    let readings: [[f32; 5]; 4] = [
        [0.7071068, 0.0, 0.0, 0.7071068, 0.05],  // upright, camera north
        [0.5, -0.5, -0.5, 0.5, 0.05],            // upright, camera east
        [0.0, 0.7071068, 0.7071068, 0.0, 0.05],  // upright, camera south
        [0.0, 0.0, 0.0, 1.0, -1.0],              // flat on the table, top edge north
    ];

    for values in readings {
        let sample = match RotationSample::from_slice(&values) {
            Ok(sample) => sample,
            Err(err) => {
                eprintln!("Skipping sample: {}", err);
                continue;
            }
        };

        let orientation = compute_orientation(&sample);
        let heading = to_heading_degrees(&orientation);
        let degrees = orientation.to_degrees();

        // positive turns clockwise
        let turn = 0.0 - heading.signed_degrees();

        println!(
            "Heading: {:.1}, Pitch: {:.1}, Roll: {:.1}, Turn to north: {:+.1}",
            heading, degrees.y, degrees.z, turn
        );
    }
}
