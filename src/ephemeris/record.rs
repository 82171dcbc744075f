use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One positional or velocity component as carried on the wire: the value
/// text under `#text` with its unit annotation under `@units`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VectorComponent {
    #[serde(rename = "#text", default)]
    pub value: String,
    #[serde(rename = "@units", default)]
    pub units: String,
}

impl VectorComponent {
    fn new(value: &str, units: &str) -> Self {
        VectorComponent {
            value: value.to_string(),
            units: units.to_string(),
        }
    }

    /// Numeric reading of the component. Unparsable text reads as `0.0`
    /// and logs, it never propagates an error.
    pub fn reading(&self) -> f64 {
        match self.value.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                log::error!("component value {:?} is not numeric", self.value);
                0.0
            }
        }
    }
}

/// A recorded sample instant with its position/velocity state vector.
///
/// The timestamp text is the record's source of truth for time; its numeric
/// form is recomputed on demand by [`parse_epoch`](super::parse_epoch).
/// Records are immutable once ingested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StateVector {
    #[serde(rename = "EPOCH", default)]
    pub epoch: String,
    #[serde(rename = "X", default)]
    pub x: VectorComponent,
    #[serde(rename = "Y", default)]
    pub y: VectorComponent,
    #[serde(rename = "Z", default)]
    pub z: VectorComponent,
    #[serde(rename = "X_DOT", default)]
    pub x_dot: VectorComponent,
    #[serde(rename = "Y_DOT", default)]
    pub y_dot: VectorComponent,
    #[serde(rename = "Z_DOT", default)]
    pub z_dot: VectorComponent,
}

impl StateVector {
    pub fn from_parts(epoch: &str, position: [&str; 3], velocity: [&str; 3]) -> Self {
        StateVector {
            epoch: epoch.to_string(),
            x: VectorComponent::new(position[0], "km"),
            y: VectorComponent::new(position[1], "km"),
            z: VectorComponent::new(position[2], "km"),
            x_dot: VectorComponent::new(velocity[0], "km/s"),
            y_dot: VectorComponent::new(velocity[1], "km/s"),
            z_dot: VectorComponent::new(velocity[2], "km/s"),
        }
    }

    /// The record substituted when storage cannot produce a real one.
    pub fn sentinel() -> Self {
        StateVector::from_parts(
            "1970-01T12:00:00.000Z",
            ["0.0", "0.0", "0.0"],
            ["0.0", "0.0", "0.0"],
        )
    }

    /// Position components in kilometers.
    pub fn position_km(&self) -> [f64; 3] {
        [self.x.reading(), self.y.reading(), self.z.reading()]
    }

    /// Velocity components in kilometers per second.
    pub fn velocity_km_s(&self) -> [f64; 3] {
        [
            self.x_dot.reading(),
            self.y_dot.reading(),
            self.z_dot.reading(),
        ]
    }

    /// Instantaneous speed: the Euclidean norm of the velocity, km/s.
    pub fn speed_km_s(&self) -> f64 {
        let [vx, vy, vz] = self.velocity_km_s();
        (vx * vx + vy * vy + vz * vz).sqrt()
    }
}
