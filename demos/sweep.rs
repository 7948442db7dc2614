use log::info;
use nalgebra::{UnitQuaternion, Vector3};
use sight_compass::{DEG_TO_RAD, HeadingStream, SensorKind};

const SAMPLE_PERIOD: f32 = 0.02; // 20 ms, the platform's normal sensor delay

/// Simulated rotation vector for a phone panned slowly around the horizon
fn rotation_vector(time: f32) -> [f32; 5] {
    let heading = 45.0 * time;
    let tilt = 5.0 * (time * 3.0).sin();

    let q = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -heading * DEG_TO_RAD)
        * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), (90.0 + tilt) * DEG_TO_RAD);
    [q.i, q.j, q.k, q.w, 0.1]
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let stream = HeadingStream::new();
    stream.subscribe(|heading| println!("Heading: {:.0}", heading));

    for step in 0..400 {
        let time = step as f32 * SAMPLE_PERIOD;

        // the platform interleaves other sensors on the same callback
        stream.on_sensor_sample(SensorKind::Accelerometer, Some(&[0.0, 9.81, 0.0]));

        if step % 25 == 0 {
            stream.on_sensor_sample(SensorKind::RotationVector, Some(&rotation_vector(time)));
        }
    }

    info!("Final heading {:.1}", stream.latest());
}
