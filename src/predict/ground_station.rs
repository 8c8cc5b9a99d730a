// WGS-84
pub(crate) const SEMI_MAJOR_KM: f64 = 6378.137;
pub(crate) const ECC_SQ: f64 = 0.00669437999014;

#[derive(Debug, Clone, Copy)]
pub struct GroundStation {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
}

impl GroundStation {
    pub fn from_coordinates(coordinates: &str, altitude_km: f64) -> Option<Self> {
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() < 2 {
            return None;
        }
        let lat = parts[0].parse().ok()?;
        let lon = parts[1].parse().ok()?;
        Some(Self {
            latitude_deg: lat,
            longitude_deg: lon,
            altitude_km,
        })
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    pub fn position_ecef_km(&self) -> [f64; 3] {
        let lat = self.lat_rad();
        let lon = self.lon_rad();
        let sin_lat = lat.sin();
        let cos_lat = lat.cos();
        let sin_lon = lon.sin();
        let cos_lon = lon.cos();
        let n = SEMI_MAJOR_KM / (1.0 - ECC_SQ * sin_lat * sin_lat).sqrt();
        let x = (n + self.altitude_km) * cos_lat * cos_lon;
        let y = (n + self.altitude_km) * cos_lat * sin_lon;
        let z = (n * (1.0 - ECC_SQ) + self.altitude_km) * sin_lat;
        [x, y, z]
    }
}
