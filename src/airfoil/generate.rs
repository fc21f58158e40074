use crate::airfoil::{Airfoil, CamberStation, ChordSpacing};
use crate::errors::{FlowError, FlowResult};
use ncollide2d::na::Point2;
use std::str::FromStr;

/// An AirfoilGenerator is an entity which can give the height and slope of the mean camber line
/// and the airfoil half thickness at fractions of the chord. This provides the information
/// necessary to place the upper and lower surfaces.
pub trait AirfoilGenerator {
    /// Height of the camber line at a chord fraction from 0.0 to 1.0
    fn camber_line(&self, x: f64) -> f64;

    /// Slope of the camber line at a chord fraction from 0.0 to 1.0
    fn camber_slope(&self, x: f64) -> f64;

    /// Half of the thickness, measured perpendicular to the camber line, at a chord fraction
    fn half_thickness(&self, x: f64) -> f64;

    /// Offsets the half thickness to either side of the camber line along its normal.
    fn station_at(&self, x: f64) -> CamberStation {
        let yc = self.camber_line(x);
        let yt = self.half_thickness(x);
        let (s, c) = self.camber_slope(x).atan().sin_cos();

        CamberStation::new(
            Point2::new(x, yc),
            Point2::new(x - yt * s, yc + yt * c),
            Point2::new(x + yt * s, yc - yt * c),
        )
    }

    /// Generates `n + 1` stations along the chord, leading edge first
    fn generate(&self, spacing: ChordSpacing, n: usize) -> FlowResult<Airfoil> {
        if n == 0 {
            return Err(FlowError::InvalidPointCount(n));
        }

        let stations: Vec<CamberStation> = spacing
            .samples(n)
            .into_iter()
            .map(|x| self.station_at(x))
            .collect();
        Ok(Airfoil::from_stations(&stations))
    }
}

const A0: f64 = 0.2969;
const A1: f64 = -0.1260;
const A2: f64 = -0.3516;
const A3: f64 = 0.2843;
const A4_CLOSED: f64 = -0.1036;
const A4_FINITE: f64 = -0.1015;

/// A generator for a NACA 4-digit airfoil of the form MPTT, where M is the maximum camber P is the
/// location of the maximum camber, and TT is the maximum thickness of the airfoil as a fraction of
/// the chord.  For example, a NACA 2412 airfoil has a 2% camber at 40% of the chord and a max
/// thickness which is 12% of the chord length.
#[derive(Clone, Debug, PartialEq)]
pub struct Naca4Digit {
    m: f64,
    p: f64,
    t: f64,
    a4: f64,
}

impl Naca4Digit {
    /// Create a new NACA 4 digit generator with a closed trailing edge.
    ///
    /// # Arguments
    ///
    /// * `max_camber` - The max camber as a fraction, for example on a NACA 2412 this value should
    /// be set to 0.02
    ///
    /// * `camber_position` - The location of the max camber as a fraction of chord length. For
    /// example on a NACA 2412 this values should be 0.4
    ///
    /// * `max_thickness` - the maximum thickness of the airfoil as a fraction of the chord length.
    /// For instance, on a NACA 2412 it should be 0.12
    pub fn new(max_camber: f64, camber_position: f64, max_thickness: f64) -> Naca4Digit {
        Naca4Digit {
            m: max_camber,
            p: camber_position,
            t: max_thickness,
            a4: A4_CLOSED,
        }
    }

    pub fn with_finite_trailing_edge(mut self, finite: bool) -> Naca4Digit {
        self.a4 = if finite { A4_FINITE } else { A4_CLOSED };
        self
    }

    pub fn max_camber(&self) -> f64 {
        self.m
    }

    pub fn camber_position(&self) -> f64 {
        self.p
    }

    pub fn max_thickness(&self) -> f64 {
        self.t
    }

    pub fn is_symmetric(&self) -> bool {
        self.m == 0.0
    }
}

impl FromStr for Naca4Digit {
    type Err = FlowError;

    /// Parses a designation such as `"2412"`. Anything other than exactly four ASCII digits is
    /// rejected, as is a cambered section with its camber at the leading edge (`"2012"`), where
    /// the forward camber polynomial is undefined.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || FlowError::InvalidDesignation(s.to_string());
        let digits: Vec<u32> = s
            .chars()
            .map(|c| c.to_digit(10))
            .collect::<Option<Vec<u32>>>()
            .ok_or_else(malformed)?;

        if digits.len() != 4 {
            return Err(malformed());
        }

        let m = digits[0] as f64 / 100.0;
        let p = digits[1] as f64 / 10.0;
        let t = (digits[2] * 10 + digits[3]) as f64 / 100.0;
        if m > 0.0 && p == 0.0 {
            return Err(malformed());
        }

        Ok(Naca4Digit::new(m, p, t))
    }
}

impl AirfoilGenerator for Naca4Digit {
    fn camber_line(&self, x: f64) -> f64 {
        if self.is_symmetric() {
            0.0
        } else if x <= self.p {
            self.m / self.p.powi(2) * x * (2.0 * self.p - x)
        } else {
            self.m / (1.0 - self.p).powi(2) * (1.0 - 2.0 * self.p + x) * (1.0 - x)
        }
    }

    fn camber_slope(&self, x: f64) -> f64 {
        if self.is_symmetric() {
            0.0
        } else if x <= self.p {
            self.m / self.p.powi(2) * (2.0 * self.p - 2.0 * x)
        } else {
            self.m / (1.0 - self.p).powi(2) * (2.0 * self.p - 2.0 * x)
        }
    }

    fn half_thickness(&self, x: f64) -> f64 {
        5.0 * self.t
            * (A0 * x.sqrt()
                + A1 * x
                + A2 * x.powi(2)
                + A3 * x.powi(3)
                + self.a4 * x.powi(4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    #[test_case(1.000000, 0.001260)]
    #[test_case(0.840000, 0.021694)]
    #[test_case(0.680000, 0.038557)]
    #[test_case(0.520000, 0.051635)]
    #[test_case(0.360000, 0.059263)]
    #[test_case(0.200000, 0.057375)]
    #[test_case(0.040000, 0.032277)]
    fn test_naca_4_thickness(x: f64, e: f64) {
        let naca = Naca4Digit::new(0.0, 0.0, 0.12).with_finite_trailing_edge(true);
        assert_relative_eq!(e, naca.half_thickness(x), epsilon = 1e-5);
    }

    #[test]
    fn test_closed_trailing_edge() {
        let naca = Naca4Digit::new(0.0, 0.0, 0.12);
        assert_relative_eq!(0.0, naca.half_thickness(1.0), epsilon = 1e-12);
        assert_eq!(0.0, naca.half_thickness(0.0));
    }

    #[test_case(1.0000, 0.0013)]
    #[test_case(0.9000, 0.0208)]
    #[test_case(0.7000, 0.0518)]
    #[test_case(0.5000, 0.0724)]
    #[test_case(0.3000, 0.0788)]
    #[test_case(0.2000, 0.0726)]
    #[test_case(0.1000, 0.0563)]
    fn test_naca_4_camber(x: f64, e: f64) {
        let naca: Naca4Digit = "2412".parse().unwrap();
        let naca = naca.with_finite_trailing_edge(true);
        let t = naca.half_thickness(x);
        let c = naca.camber_line(x);
        assert_relative_eq!(e, t + c, epsilon = 1e-3);
    }

    #[test]
    fn test_camber_peak_and_slope() {
        let naca: Naca4Digit = "4415".parse().unwrap();
        assert_relative_eq!(0.04, naca.camber_line(0.4), epsilon = 1e-15);
        assert_relative_eq!(0.0, naca.camber_slope(0.4), epsilon = 1e-15);
        assert_relative_eq!(0.0, naca.camber_line(1.0), epsilon = 1e-15);
        assert_relative_eq!(0.0, naca.camber_line(0.0), epsilon = 1e-15);

        // Central differences on both camber polynomials
        for x in [0.1, 0.3, 0.6, 0.9] {
            let h = 1e-6;
            let d = (naca.camber_line(x + h) - naca.camber_line(x - h)) / (2.0 * h);
            assert_relative_eq!(d, naca.camber_slope(x), epsilon = 1e-8);
        }
    }

    #[test]
    fn test_station_is_centered_on_camber() {
        let naca: Naca4Digit = "2412".parse().unwrap();
        for x in [0.05, 0.25, 0.4, 0.75] {
            let s = naca.station_at(x);
            assert_relative_eq!(s.camber.x, (s.upper.x + s.lower.x) / 2.0, epsilon = 1e-15);
            assert_relative_eq!(s.camber.y, (s.upper.y + s.lower.y) / 2.0, epsilon = 1e-15);
            assert_relative_eq!(
                2.0 * naca.half_thickness(x),
                (s.upper - s.lower).norm(),
                epsilon = 1e-12
            );
        }
    }

    #[test_case("2412", 0.02, 0.4, 0.12)]
    #[test_case("0012", 0.0, 0.0, 0.12)]
    #[test_case("0412", 0.0, 0.4, 0.12)]
    #[test_case("6409", 0.06, 0.4, 0.09)]
    fn test_parse_designation(s: &str, m: f64, p: f64, t: f64) {
        let naca: Naca4Digit = s.parse().unwrap();
        assert_relative_eq!(m, naca.max_camber());
        assert_relative_eq!(p, naca.camber_position());
        assert_relative_eq!(t, naca.max_thickness());
    }

    #[test_case("12")]
    #[test_case("abcd")]
    #[test_case("99999")]
    #[test_case("2012")]
    #[test_case("２４１２")]
    #[test_case("-412")]
    fn test_parse_rejects(s: &str) {
        assert!(matches!(
            s.parse::<Naca4Digit>(),
            Err(FlowError::InvalidDesignation(_))
        ));
    }
}
