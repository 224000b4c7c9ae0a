use serde::{Deserialize, Serialize};

/// Configuration for the geometry of an aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AircraftGeometry {
    /// The total wing area of the aircraft (m²).
    pub wing_area: f64,
    /// The wingspan of the aircraft (m).
    pub wing_span: f64,
    /// The mean aerodynamic chord of the aircraft (m).
    pub mac: f64,
    /// Horizontal stabiliser area (m²).
    pub tail_area: f64,
    /// Horizontal stabiliser span (m).
    pub tail_span: f64,
    /// Tail length, wing to stabiliser aerodynamic centre (m).
    pub tail_arm: f64,
    /// Stabiliser angle of incidence (rad).
    pub tail_incidence: f64,
    /// Ratio of the airspeed at the tail to the free stream airspeed.
    pub tail_speed_ratio: f64,
}

impl AircraftGeometry {
    /// Creates a new `AircraftGeometry` for a conventional tail aircraft.
    ///
    /// # Arguments
    /// * `wing_area` - The total wing area of the aircraft (m²).
    /// * `wing_span` - The wing span of the aircraft (m).
    /// * `mac` - The mean aerodynamic chord (m).
    /// * `tail_area` - The horizontal stabiliser area (m²).
    /// * `tail_span` - The horizontal stabiliser span (m).
    /// * `tail_arm` - Distance from wing to stabiliser (m).
    pub fn new(
        wing_area: f64,
        wing_span: f64,
        mac: f64,
        tail_area: f64,
        tail_span: f64,
        tail_arm: f64,
    ) -> Self {
        AircraftGeometry {
            wing_area,
            wing_span,
            mac,
            tail_area,
            tail_span,
            tail_arm,
            tail_incidence: 0.0,
            tail_speed_ratio: 1.0,
        }
    }

    pub fn citation_550() -> Self {
        let wing_area = 30.0;
        Self {
            tail_incidence: -2.0_f64.to_radians(),
            ..Self::new(
                wing_area,
                15.911,
                2.0569,
                0.2 * wing_area,
                5.791,
                0.71 * 5.968,
            )
        }
    }

    /// Wing aspect ratio b²/S.
    pub fn aspect_ratio(&self) -> f64 {
        self.wing_span.powi(2) / self.wing_area
    }
}

/// Dimensionless squared radii of gyration, used in place of the inertia
/// tensor by the non-dimensional equations of motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InertiaRadii {
    pub kx2: f64,
    pub ky2: f64,
    pub kz2: f64,
    pub kxz: f64,
}

impl InertiaRadii {
    pub fn citation_550() -> Self {
        Self {
            kx2: 0.019,
            ky2: 1.25 * 1.114,
            kz2: 0.042,
            kxz: 0.002,
        }
    }
}
