use glam::Vec3;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FuelBand {
    Green,
    Yellow,
    Red,
}

impl FuelBand {
    pub fn from_percent(fuel: f64) -> Self {
        if fuel > 50.0 {
            Self::Green
        } else if fuel > 20.0 {
            Self::Yellow
        } else {
            Self::Red
        }
    }

    pub fn rgb(self) -> Vec3 {
        match self {
            Self::Green => Vec3::new(0.2, 1.0, 0.2),
            Self::Yellow => Vec3::new(1.0, 1.0, 0.2),
            Self::Red => Vec3::new(1.0, 0.2, 0.2),
        }
    }
}

/// Blue to green below half range, green to yellow up to 80%, yellow to red above.
pub fn temperature_rgb(ratio: f32) -> Vec3 {
    let ratio = ratio.clamp(0.0, 1.0);
    if ratio < 0.5 {
        let t = ratio / 0.5;
        Vec3::new(0.3 * (1.0 - t), 0.5 + 0.5 * t, 1.0 - t)
    } else if ratio < 0.8 {
        let t = (ratio - 0.5) / 0.3;
        Vec3::new(0.3 + 0.7 * t, 1.0 - 0.2 * t, 0.5 * (1.0 - t))
    } else {
        let t = (ratio - 0.8) / 0.2;
        Vec3::new(1.0, 0.8 * (1.0 - t), 0.2 * (1.0 - t))
    }
}
