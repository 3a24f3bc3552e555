//! Albers equal-area conic projection on an ellipsoid
//!
//! Grid math assumes linear coordinates, so geographic boundaries are moved
//! onto an equal-area plane before any sweep. The forward equations follow
//! Snyder, "Map Projections: A Working Manual" (USGS 1395), pp. 101-102.

use geo::{Coord, coord};

use crate::io::error::{Result, invalid_parameter};

/// Reference ellipsoid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Equatorial radius in metres
    pub semi_major_axis: f64,
    /// Reciprocal of the flattening
    pub inverse_flattening: f64,
}

impl Ellipsoid {
    /// GRS 1980, used by NAD83
    pub const GRS80: Self = Self {
        semi_major_axis: 6_378_137.0,
        inverse_flattening: 298.257_222_101,
    };

    /// First eccentricity squared
    pub fn eccentricity_squared(&self) -> f64 {
        let f = 1.0 / self.inverse_flattening;
        f.mul_add(-f, 2.0 * f)
    }
}

/// Defining constants of an Albers projection, angles in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlbersParameters {
    /// Reference ellipsoid
    pub ellipsoid: Ellipsoid,
    /// Latitude of the false origin
    pub origin_latitude: f64,
    /// Central meridian
    pub central_meridian: f64,
    /// First standard parallel
    pub standard_parallel_1: f64,
    /// Second standard parallel
    pub standard_parallel_2: f64,
    /// Easting at the false origin, metres
    pub false_easting: f64,
    /// Northing at the false origin, metres
    pub false_northing: f64,
}

impl AlbersParameters {
    /// EPSG:5070, NAD83 / Conus Albers
    pub const CONUS: Self = Self {
        ellipsoid: Ellipsoid::GRS80,
        origin_latitude: 23.0,
        central_meridian: -96.0,
        standard_parallel_1: 29.5,
        standard_parallel_2: 45.5,
        false_easting: 0.0,
        false_northing: 0.0,
    };
}

/// Forward Albers equal-area conic projection with precomputed constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlbersEqualArea {
    semi_major_axis: f64,
    eccentricity: f64,
    n: f64,
    c: f64,
    rho0: f64,
    central_meridian: f64,
    false_easting: f64,
    false_northing: f64,
}

impl AlbersEqualArea {
    /// Precompute the cone constants for `parameters`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any latitude lies outside `[-90, 90]` or any value is non-finite
    /// - The ellipsoid is not a flattened sphere
    /// - The standard parallels are symmetric about the equator (no cone)
    pub fn new(parameters: &AlbersParameters) -> Result<Self> {
        let latitudes = [
            parameters.origin_latitude,
            parameters.standard_parallel_1,
            parameters.standard_parallel_2,
        ];
        if latitudes.iter().any(|lat| !lat.is_finite() || lat.abs() > 90.0) {
            return Err(invalid_parameter(
                "latitude",
                &format!("{latitudes:?}"),
                &"latitudes must be finite and within [-90, 90]",
            ));
        }

        let e2 = parameters.ellipsoid.eccentricity_squared();
        if !(e2 > 0.0 && e2 < 1.0) || !(parameters.ellipsoid.semi_major_axis > 0.0) {
            return Err(invalid_parameter(
                "ellipsoid",
                &format!("{:?}", parameters.ellipsoid),
                &"requires a positive radius and an eccentricity in (0, 1)",
            ));
        }
        let e = e2.sqrt();

        let phi1 = parameters.standard_parallel_1.to_radians();
        let phi2 = parameters.standard_parallel_2.to_radians();
        let m1 = m(e, phi1);
        let m2 = m(e, phi2);
        let q1 = q(e, phi1.sin());
        let q2 = q(e, phi2.sin());

        let n = if (phi1 - phi2).abs() > f64::EPSILON {
            m1.mul_add(m1, -(m2 * m2)) / (q2 - q1)
        } else {
            phi1.sin()
        };
        if !n.is_finite() || n.abs() < f64::EPSILON {
            return Err(invalid_parameter(
                "standard_parallels",
                &format!("({}, {})", parameters.standard_parallel_1, parameters.standard_parallel_2),
                &"parallels must not be symmetric about the equator",
            ));
        }

        let c = n.mul_add(q1, m1 * m1);
        let mut projection = Self {
            semi_major_axis: parameters.ellipsoid.semi_major_axis,
            eccentricity: e,
            n,
            c,
            rho0: 0.0,
            central_meridian: parameters.central_meridian.to_radians(),
            false_easting: parameters.false_easting,
            false_northing: parameters.false_northing,
        };
        projection.rho0 = projection.rho(parameters.origin_latitude.to_radians());
        Ok(projection)
    }

    /// Projection used for U.S. national boundaries
    ///
    /// # Errors
    ///
    /// Never fails for the built-in constants; the `Result` mirrors [`Self::new`]
    pub fn conus() -> Result<Self> {
        Self::new(&AlbersParameters::CONUS)
    }

    fn rho(&self, phi: f64) -> f64 {
        let radicand = self.n.mul_add(-q(self.eccentricity, phi.sin()), self.c);
        self.semi_major_axis * radicand.max(0.0).sqrt() / self.n
    }

    /// Project a longitude/latitude pair in degrees to metres
    pub fn forward(&self, longitude: f64, latitude: f64) -> Coord<f64> {
        let rho = self.rho(latitude.to_radians());
        let theta = self.n * (longitude.to_radians() - self.central_meridian);
        coord! {
            x: rho.mul_add(theta.sin(), self.false_easting),
            y: rho.mul_add(-theta.cos(), self.false_northing + self.rho0),
        }
    }

    /// Project a coordinate holding longitude in `x` and latitude in `y`
    pub fn project(&self, geographic: Coord<f64>) -> Coord<f64> {
        self.forward(geographic.x, geographic.y)
    }
}

// Snyder eq. 3-12
fn q(e: f64, sin_phi: f64) -> f64 {
    let e2 = e * e;
    let e_sin = e * sin_phi;
    (1.0 - e2)
        * (sin_phi / e_sin.mul_add(-e_sin, 1.0)
            - (1.0 / (2.0 * e)) * ((1.0 - e_sin) / (1.0 + e_sin)).ln())
}

// Snyder eq. 14-15
fn m(e: f64, phi: f64) -> f64 {
    let e_sin = e * phi.sin();
    phi.cos() / e_sin.mul_add(-e_sin, 1.0).sqrt()
}
