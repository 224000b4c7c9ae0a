use citation_dynamics::components::Telemetry;
use std::collections::BTreeMap;
use std::f64::consts::PI;

/// Sample interval of the synthetic recordings (s).
pub const SAMPLE_TIME: f64 = 0.1;

/// Channels of a synthetic flight test recording using the default channel
/// names: a slow climb with an elevator doublet, an aileron pulse and a
/// rudder doublet. Angles are in radians unless `degrees` is set.
pub fn recording_channels(samples: usize, degrees: bool) -> BTreeMap<String, Vec<f64>> {
    let time: Vec<f64> = (0..samples).map(|i| i as f64 * SAMPLE_TIME).collect();
    let angle = |v: f64| if degrees { v.to_degrees() } else { v };
    let doublet = |t: f64, start: f64, amplitude: f64| {
        if (start..start + 1.0).contains(&t) {
            amplitude
        } else if (start + 1.0..start + 2.0).contains(&t) {
            -amplitude
        } else {
            0.0
        }
    };
    let series = |f: &dyn Fn(f64) -> f64| -> Vec<f64> { time.iter().map(|&t| f(t)).collect() };

    let mut channels = BTreeMap::new();
    channels.insert("time".to_string(), time.clone());
    channels.insert("Dadc1_tas".to_string(), series(&|t| 100.0 + 0.2 * (0.3 * t).sin()));
    channels.insert(
        "vane_AOA".to_string(),
        series(&|t| angle(0.05 + 0.002 * (0.5 * t).sin())),
    );
    channels.insert("Ahrs1_Pitch".to_string(), series(&|t| angle(0.02 + 0.001 * t)));
    channels.insert(
        "Ahrs1_bPitchRate".to_string(),
        series(&|t| angle(0.001 + 0.0005 * (t * PI / 5.0).cos())),
    );
    channels.insert(
        "Fms1_trueHeading".to_string(),
        series(&|t| angle(0.003 * (0.2 * t).sin())),
    );
    channels.insert("Ahrs1_Roll".to_string(), series(&|t| angle(0.01 + 0.002 * t)));
    channels.insert("Ahrs1_bRollRate".to_string(), series(&|_| angle(0.002)));
    channels.insert(
        "Ahrs1_bYawRate".to_string(),
        series(&|t| angle(-0.001 * (0.4 * t).cos())),
    );
    channels.insert(
        "delta_e".to_string(),
        series(&|t| angle(-0.02 + doublet(t, 1.0, 0.01))),
    );
    channels.insert(
        "delta_a".to_string(),
        series(&|t| angle(0.001 + doublet(t, 2.0, 0.015))),
    );
    channels.insert("delta_r".to_string(), series(&|t| angle(doublet(t, 3.0, -0.01))));
    channels.insert("Dadc1_alt".to_string(), series(&|t| 2000.0 + 0.5 * t));
    channels.insert("mass".to_string(), series(&|t| 6000.0 - 0.1 * t));
    channels
}

pub fn synthetic_recording(samples: usize) -> Telemetry {
    let mut channels = recording_channels(samples, false);
    let time = channels.remove("time").unwrap_or_default();
    Telemetry::new(time, channels).unwrap()
}
