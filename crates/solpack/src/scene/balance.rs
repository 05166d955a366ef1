//! A two-pan balance weighing one body against the rest.
//!
//! The selected body sits on the left pan, the summed mass of a pool of other
//! bodies on the right. The beam tilts by `-log10(ratio) * 14` degrees,
//! limited to ±24, so a body heavier than its pool dips to the left.

use log::debug;

use solpack_core::{body::Magnitude, identifier::Id, scale::ContinuousScale};
use solpack_data::Catalog;

/// Degrees of tilt per decade of mass ratio
const TILT_PER_DECADE: f64 = 14.0;
const MAX_TILT: f64 = 24.0;
const BALL_RADIUS_RANGE: (f32, f32) = (10.0, 34.0);
/// Body selected on load when present
const DEFAULT_SELECTION: &str = "Jupiter";

/// SI prefixes from yocto to yotta
const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    id: Id,
    is_planet: bool,
    mass: f64,
}

/// Bodies with a usable mass, heaviest first.
#[derive(Debug, Clone)]
pub struct MassBalance {
    root: Id,
    entries: Vec<Entry>,
    ball_scale: Option<ContinuousScale>,
    heaviest_non_root: Option<f64>,
}

/// Which bodies end up on the right pan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    /// Every body except the root and the selection
    AllOthers,
    /// Every planet except the root and the selection
    PlanetsOnly,
}

/// The result of weighing a selection against its pool.
#[derive(Debug, Clone, PartialEq)]
pub struct Weighing {
    selected: Id,
    selected_mass: Option<f64>,
    others_mass: f64,
    others_label: String,
    beam_angle: f64,
    left_ball_radius: Option<f32>,
    right_ball_radius: Option<f32>,
}

impl MassBalance {
    /// Collects every body with a finite, positive mass.
    pub fn from_catalog(catalog: &Catalog, root: &str) -> Self {
        let root = Id::new(root);
        let mut entries: Vec<Entry> = catalog
            .records()
            .iter()
            .filter_map(|record| {
                record
                    .positive_magnitude(Magnitude::Mass)
                    .map(|mass| Entry {
                        id: record.id(),
                        is_planet: record.is_planet(),
                        mass,
                    })
            })
            .collect();
        entries.sort_by(|a, b| b.mass.total_cmp(&a.mass));

        let non_root: Vec<f64> = entries
            .iter()
            .filter(|e| e.id != root)
            .map(|e| e.mass)
            .collect();
        let lightest = non_root.iter().copied().reduce(f64::min);
        let heaviest = non_root.iter().copied().reduce(f64::max);
        let ball_scale = lightest.zip(heaviest).and_then(|(lo, hi)| {
            ContinuousScale::sqrt((lo.cbrt(), hi.cbrt()), BALL_RADIUS_RANGE).ok()
        });

        debug!(bodies = entries.len(); "Mass balance built");
        Self {
            root,
            entries,
            ball_scale,
            heaviest_non_root: heaviest,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `Jupiter` when present, else the heaviest body.
    pub fn default_selection(&self) -> Option<Id> {
        let preferred = Id::new(DEFAULT_SELECTION);
        if self.contains(preferred) {
            Some(preferred)
        } else {
            self.entries.first().map(|e| e.id)
        }
    }

    /// Bodies offered for selection, heaviest first. The root is always
    /// offered, even when only planets are.
    pub fn choices(&self, pool: Pool) -> Vec<Id> {
        self.entries
            .iter()
            .filter(|e| pool == Pool::AllOthers || e.is_planet || e.id == self.root)
            .map(|e| e.id)
            .collect()
    }

    /// Keeps `selected` if it is still offered, else falls back to the
    /// default selection.
    pub fn reselect(&self, selected: Id, pool: Pool) -> Option<Id> {
        let choices = self.choices(pool);
        if choices.contains(&selected) {
            return Some(selected);
        }
        let preferred = Id::new(DEFAULT_SELECTION);
        if choices.contains(&preferred) {
            Some(preferred)
        } else {
            choices.first().copied()
        }
    }

    /// Weighs `selected` against `pool`.
    ///
    /// Selecting the root weighs it against every planet, whatever the pool.
    pub fn weigh(&self, selected: Id, pool: Pool) -> Weighing {
        let selected_mass = self.mass(selected);

        let (others_label, others_mass) = if selected == self.root {
            (
                format!("All planets (excluding {})", self.root),
                self.sum(|e| e.is_planet && e.id != self.root),
            )
        } else {
            (
                format!("All others (excluding {})", self.root),
                self.sum(|e| {
                    e.id != self.root
                        && e.id != selected
                        && (pool == Pool::AllOthers || e.is_planet)
                }),
            )
        };

        let ratio = selected_mass.map_or(f64::NAN, |m| m / others_mass);

        let left_ball_radius = selected_mass.and_then(|mass| {
            let size = if selected == self.root {
                self.heaviest_non_root?
            } else {
                mass
            };
            self.ball_radius(size)
        });
        let right_ball_radius = if others_mass > 0.0 {
            self.ball_radius(others_mass)
        } else {
            None
        };

        Weighing {
            selected,
            selected_mass,
            others_mass,
            others_label,
            beam_angle: beam_angle(ratio),
            left_ball_radius,
            right_ball_radius,
        }
    }

    fn contains(&self, id: Id) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    fn mass(&self, id: Id) -> Option<f64> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.mass)
    }

    fn sum(&self, include: impl Fn(&Entry) -> bool) -> f64 {
        self.entries
            .iter()
            .filter(|e| include(e))
            .map(|e| e.mass)
            .sum()
    }

    fn ball_radius(&self, mass: f64) -> Option<f32> {
        self.ball_scale.map(|scale| scale.map(mass.cbrt()))
    }
}

impl Weighing {
    pub fn selected(&self) -> Id {
        self.selected
    }

    pub fn selected_mass(&self) -> Option<f64> {
        self.selected_mass
    }

    pub fn others_mass(&self) -> f64 {
        self.others_mass
    }

    /// Title of the right pan
    pub fn others_label(&self) -> &str {
        &self.others_label
    }

    /// Selected mass over pooled mass, when both are usable
    pub fn ratio(&self) -> Option<f64> {
        let ratio = self.selected_mass? / self.others_mass;
        (ratio.is_finite() && self.others_mass > 0.0).then_some(ratio)
    }

    /// Beam rotation in degrees; the pans counter-rotate by the same angle.
    pub fn beam_angle(&self) -> f64 {
        self.beam_angle
    }

    pub fn left_ball_radius(&self) -> Option<f32> {
        self.left_ball_radius
    }

    pub fn right_ball_radius(&self) -> Option<f32> {
        self.right_ball_radius
    }

    /// Ratio such as `2.10×`, `12.3×` or `1.1k×`; `—` when unusable.
    pub fn ratio_text(&self) -> String {
        self.ratio().map_or_else(|| "—".to_string(), format_ratio)
    }

    pub fn selected_mass_text(&self) -> String {
        match self.selected_mass {
            Some(mass) if mass.is_finite() => format_si(mass, 3),
            _ => "—".to_string(),
        }
    }

    pub fn others_mass_text(&self) -> String {
        if self.others_mass.is_finite() && self.others_mass > 0.0 {
            format_si(self.others_mass, 3)
        } else {
            "—".to_string()
        }
    }
}

/// Beam tilt for a mass ratio; zero when the ratio is unusable.
pub fn beam_angle(ratio: f64) -> f64 {
    if !ratio.is_finite() || ratio <= 0.0 {
        return 0.0;
    }
    (-ratio.log10() * TILT_PER_DECADE).clamp(-MAX_TILT, MAX_TILT)
}

/// Formats a ratio with a trailing `×`.
pub fn format_ratio(ratio: f64) -> String {
    if !ratio.is_finite() {
        return "—".to_string();
    }
    if ratio >= 1000.0 {
        format!("{}×", format_si(ratio, 2))
    } else if ratio >= 10.0 {
        format!("{ratio:.1}×")
    } else {
        format!("{ratio:.2}×")
    }
}

/// Formats `value` with `precision` significant digits and an SI prefix,
/// trimming insignificant trailing zeros: `1.9e27` with 3 digits is
/// `1900Y`, `1047.6` with 2 digits is `1k`.
pub fn format_si(value: f64, precision: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }
    let precision = precision.max(1) as i32;

    let exponent = value.abs().log10().floor() as i32;
    let unit = 10f64.powi(exponent - precision + 1);
    let rounded = (value / unit).round() * unit;
    let exponent = rounded.abs().log10().floor() as i32;

    let group = exponent.div_euclid(3).clamp(-8, 8);
    let mantissa = rounded / 10f64.powi(group * 3);
    let decimals = (precision - 1 - (exponent - group * 3)).max(0) as usize;

    let mut digits = format!("{mantissa:.decimals$}");
    if digits.contains('.') {
        digits = digits.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    format!("{digits}{}", SI_PREFIXES[(group + 8) as usize])
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    const SYSTEM: &str = "\
eName,isPlanet,mass_kg
Sun,FALSE,1000
Jupiter,TRUE,100
Saturn,TRUE,30
Earth,TRUE,1
Titan,FALSE,0.1
Dust,FALSE,0
";

    fn balance() -> MassBalance {
        MassBalance::from_catalog(&solpack_data::parse(SYSTEM).unwrap(), "Sun")
    }

    #[test]
    fn test_beam_angle() {
        assert_eq!(beam_angle(1.0), 0.0);
        assert_approx_eq!(f64, beam_angle(10.0), -14.0);
        assert_eq!(beam_angle(1e6), -24.0);
        assert_eq!(beam_angle(1e-6), 24.0);
        assert_eq!(beam_angle(f64::NAN), 0.0);
        assert_eq!(beam_angle(0.0), 0.0);
    }

    #[test]
    fn test_default_selection_prefers_jupiter() {
        assert_eq!(balance().default_selection(), Some(Id::new("Jupiter")));

        let no_jupiter = MassBalance::from_catalog(
            &solpack_data::parse("eName,mass_kg\nEarth,1\nMars,0.1\n").unwrap(),
            "Sun",
        );
        assert_eq!(no_jupiter.default_selection(), Some(Id::new("Earth")));
    }

    #[test]
    fn test_weigh_against_all_others() {
        let weighing = balance().weigh(Id::new("Jupiter"), Pool::AllOthers);
        assert_approx_eq!(f64, weighing.others_mass(), 31.1, epsilon = 1e-9);
        assert_eq!(weighing.others_label(), "All others (excluding Sun)");
        assert!(weighing.beam_angle() < 0.0);
    }

    #[test]
    fn test_weigh_planets_only() {
        let weighing = balance().weigh(Id::new("Jupiter"), Pool::PlanetsOnly);
        assert_approx_eq!(f64, weighing.others_mass(), 31.0, epsilon = 1e-9);
    }

    #[test]
    fn test_weigh_root_against_planets() {
        let weighing = balance().weigh(Id::new("Sun"), Pool::AllOthers);
        assert_approx_eq!(f64, weighing.others_mass(), 131.0, epsilon = 1e-9);
        assert_eq!(weighing.others_label(), "All planets (excluding Sun)");
        // the root is drawn as large as the heaviest other body
        assert_approx_eq!(f32, weighing.left_ball_radius().unwrap(), 34.0, epsilon = 1e-4);
    }

    #[test]
    fn test_unknown_selection_has_no_ratio() {
        let weighing = balance().weigh(Id::new("Vulcan"), Pool::AllOthers);
        assert_eq!(weighing.ratio(), None);
        assert_eq!(weighing.ratio_text(), "—");
        assert_eq!(weighing.beam_angle(), 0.0);
        assert_eq!(weighing.left_ball_radius(), None);
    }

    #[test]
    fn test_choices_keep_root_when_planets_only() {
        let balance = balance();
        let choices = balance.choices(Pool::PlanetsOnly);
        let expected: Vec<Id> = ["Sun", "Jupiter", "Saturn", "Earth"]
            .into_iter()
            .map(Id::new)
            .collect();
        assert_eq!(choices, expected);
        assert_eq!(
            balance.reselect(Id::new("Titan"), Pool::PlanetsOnly),
            Some(Id::new("Jupiter"))
        );
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(2.1), "2.10×");
        assert_eq!(format_ratio(12.34), "12.3×");
        assert_eq!(format_ratio(1047.6), "1k×");
        assert_eq!(format_ratio(330_000.0), "330k×");
        assert_eq!(format_ratio(f64::INFINITY), "—");
    }

    #[test]
    fn test_format_si() {
        assert_eq!(format_si(1.898e27, 3), "1900Y");
        assert_eq!(format_si(5.97e24, 3), "5.97Y");
        assert_eq!(format_si(7.35e22, 3), "73.5Z");
        assert_eq!(format_si(0.5, 3), "500m");
    }
}
