//! Typed body records and lookups over a parsed dataset.

use indexmap::IndexMap;
use log::{debug, info};

use solpack_core::{body::Magnitude, body::OrbitType, identifier::Id};

use crate::{
    coerce,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
    table::{Row, Table},
};

/// Column names understood by the catalog.
pub mod columns {
    pub const NAME: &str = "eName";
    pub const IS_PLANET: &str = "isPlanet";
    pub const ORBIT_TYPE: &str = "orbit_type";
    pub const ORBITS: &str = "orbits";
    pub const SEMIMAJOR_AXIS: &str = "semimajorAxis";
    pub const SEMIMAJOR_AXIS_AU: &str = "semimajorAxis_AU";
    pub const ECCENTRICITY: &str = "eccentricity";
    pub const MEAN_RADIUS: &str = "meanRadius";
    pub const MASS: &str = "mass_kg";
    pub const VOLUME: &str = "volume";
    pub const DISCOVERY_DATE: &str = "discoveryDate";
}

/// One row of the dataset with every field coerced.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyRecord {
    id: Id,
    name: String,
    slug: String,
    is_planet: bool,
    orbit_type: Option<OrbitType>,
    orbits: Option<String>,
    semimajor_axis_km: Option<f64>,
    semimajor_axis_au: Option<f64>,
    eccentricity: Option<f64>,
    mean_radius: Option<f64>,
    mass_kg: Option<f64>,
    volume: Option<f64>,
    discovery_year: Option<i32>,
    span: Span,
    magnitude_spans: [Option<Span>; 3],
}

impl BodyRecord {
    /// Interned display name
    pub fn id(&self) -> Id {
        self.id
    }

    /// Display name as written in the dataset
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name with spaces, slashes and parentheses replaced by `-`
    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn is_planet(&self) -> bool {
        self.is_planet
    }

    /// `Primary` or `Secondary`; `None` when the column is blank or unknown.
    pub fn orbit_type(&self) -> Option<OrbitType> {
        self.orbit_type
    }

    /// Name of the body this one orbits, as written (may be `NA`).
    pub fn orbits(&self) -> Option<&str> {
        self.orbits.as_deref()
    }

    /// Semi-major axis in km, about the sun for primaries and about the
    /// parent for secondaries.
    pub fn semimajor_axis_km(&self) -> Option<f64> {
        self.semimajor_axis_km
    }

    pub fn semimajor_axis_au(&self) -> Option<f64> {
        self.semimajor_axis_au
    }

    pub fn eccentricity(&self) -> Option<f64> {
        self.eccentricity
    }

    pub fn mean_radius(&self) -> Option<f64> {
        self.mean_radius
    }

    pub fn mass_kg(&self) -> Option<f64> {
        self.mass_kg
    }

    pub fn volume(&self) -> Option<f64> {
        self.volume
    }

    pub fn discovery_year(&self) -> Option<i32> {
        self.discovery_year
    }

    /// Source span of the whole row
    pub fn span(&self) -> Span {
        self.span
    }

    /// Value of the requested magnitude, if present.
    pub fn magnitude(&self, magnitude: Magnitude) -> Option<f64> {
        match magnitude {
            Magnitude::Volume => self.volume,
            Magnitude::Mass => self.mass_kg,
            Magnitude::MeanRadius => self.mean_radius,
        }
    }

    /// Value of the requested magnitude when it is finite and strictly
    /// positive.
    pub fn positive_magnitude(&self, magnitude: Magnitude) -> Option<f64> {
        self.magnitude(magnitude).filter(|m| m.is_finite() && *m > 0.0)
    }

    fn magnitude_span(&self, magnitude: Magnitude) -> Span {
        let idx = match magnitude {
            Magnitude::Volume => 0,
            Magnitude::Mass => 1,
            Magnitude::MeanRadius => 2,
        };
        self.magnitude_spans[idx].unwrap_or(self.span)
    }
}

/// Column indices resolved once against the header.
struct ColumnMap {
    name: usize,
    is_planet: Option<usize>,
    orbit_type: Option<usize>,
    orbits: Option<usize>,
    semimajor_axis: Option<usize>,
    semimajor_axis_au: Option<usize>,
    eccentricity: Option<usize>,
    mean_radius: Option<usize>,
    mass: Option<usize>,
    volume: Option<usize>,
    discovery_date: Option<usize>,
}

impl ColumnMap {
    fn resolve(table: &Table) -> Result<Self, ParseError> {
        let Some(name) = table.column(columns::NAME) else {
            return Err(Diagnostic::error(format!(
                "dataset has no `{}` column",
                columns::NAME
            ))
            .with_code(ErrorCode::E200)
            .with_label(table.header_span(), ErrorCode::E200.description())
            .with_help("the catalog keys every body by its `eName` column")
            .into());
        };

        debug!(columns:? = table.column_names().collect::<Vec<_>>(); "Dataset header");
        for column in [
            columns::ORBIT_TYPE,
            columns::SEMIMAJOR_AXIS,
            columns::MASS,
            columns::VOLUME,
        ] {
            if table.column(column).is_none() {
                debug!(column = column; "Optional column absent, values will be missing");
            }
        }

        Ok(Self {
            name,
            is_planet: table.column(columns::IS_PLANET),
            orbit_type: table.column(columns::ORBIT_TYPE),
            orbits: table.column(columns::ORBITS),
            semimajor_axis: table.column(columns::SEMIMAJOR_AXIS),
            semimajor_axis_au: table.column(columns::SEMIMAJOR_AXIS_AU),
            eccentricity: table.column(columns::ECCENTRICITY),
            mean_radius: table.column(columns::MEAN_RADIUS),
            mass: table.column(columns::MASS),
            volume: table.column(columns::VOLUME),
            discovery_date: table.column(columns::DISCOVERY_DATE),
        })
    }
}

fn text(row: &Row, column: Option<usize>) -> Option<&str> {
    column.and_then(|c| row.get(c)).and_then(coerce::parse_text)
}

fn number(row: &Row, column: Option<usize>) -> Option<f64> {
    column.and_then(|c| row.get(c)).and_then(coerce::parse_number)
}

fn parse_orbit_type(raw: &str) -> Option<OrbitType> {
    if raw.eq_ignore_ascii_case("primary") {
        Some(OrbitType::Primary)
    } else if raw.eq_ignore_ascii_case("secondary") {
        Some(OrbitType::Secondary)
    } else if raw.eq_ignore_ascii_case("root") {
        Some(OrbitType::Root)
    } else {
        None
    }
}

/// Every body of a dataset, in row order, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<BodyRecord>,
    by_id: IndexMap<Id, usize>,
}

impl Catalog {
    /// Builds the catalog from a shape-checked table.
    ///
    /// Rows without a name and rows repeating an earlier name are skipped
    /// with a warning.
    ///
    /// # Errors
    ///
    /// E200 when the `eName` column is missing.
    pub fn from_table(table: &Table) -> Result<Self, ParseError> {
        let map = ColumnMap::resolve(table)?;
        let mut diagnostics = DiagnosticCollector::new();
        let mut catalog = Catalog::default();

        for row in table.rows() {
            let Some(name) = text(row, Some(map.name)) else {
                diagnostics.emit(
                    Diagnostic::warning("row has no body name and was skipped")
                        .with_label(row.span(), "unnamed row"),
                );
                continue;
            };

            let id = Id::new(name);
            if let Some(&first) = catalog.by_id.get(&id) {
                diagnostics.emit(
                    Diagnostic::warning(format!("body `{name}` appears more than once"))
                        .with_label(row.span(), "skipped")
                        .with_secondary_label(catalog.records[first].span, "first row"),
                );
                continue;
            }

            let record = BodyRecord {
                id,
                name: name.to_string(),
                slug: coerce::id_safe(name),
                is_planet: map
                    .is_planet
                    .and_then(|c| row.get(c))
                    .is_some_and(coerce::parse_flag),
                orbit_type: text(row, map.orbit_type).and_then(parse_orbit_type),
                orbits: text(row, map.orbits).map(str::to_string),
                semimajor_axis_km: number(row, map.semimajor_axis),
                semimajor_axis_au: number(row, map.semimajor_axis_au),
                eccentricity: number(row, map.eccentricity),
                mean_radius: number(row, map.mean_radius),
                mass_kg: number(row, map.mass),
                volume: number(row, map.volume),
                discovery_year: text(row, map.discovery_date).and_then(coerce::discovery_year),
                span: row.span(),
                magnitude_spans: [map.volume, map.mass, map.mean_radius]
                    .map(|c| c.map(|c| row.span_of(c))),
            };

            catalog.by_id.insert(id, catalog.records.len());
            catalog.records.push(record);
        }

        diagnostics.finish()?;

        info!(bodies = catalog.records.len(); "Catalog loaded");
        Ok(catalog)
    }

    /// Records in dataset order
    pub fn records(&self) -> &[BodyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: Id) -> Option<&BodyRecord> {
        self.by_id.get(&id).map(|&idx| &self.records[idx])
    }

    /// Looks a body up by display name. Unknown names are not interned.
    pub fn find(&self, name: &str) -> Option<&BodyRecord> {
        Id::lookup(name).and_then(|id| self.get(id))
    }

    /// Looks a body up by display name, failing with E300.
    pub fn require(&self, name: &str) -> Result<&BodyRecord, ParseError> {
        self.find(name).ok_or_else(|| {
            Diagnostic::error(format!("no body named `{name}` in the dataset"))
                .with_code(ErrorCode::E300)
                .with_help("check the spelling against the `eName` column")
                .into()
        })
    }

    /// Looks a body up and returns its magnitude, failing with E300 when the
    /// body is absent and E301 when the magnitude is missing, zero, negative
    /// or not finite.
    pub fn require_magnitude(
        &self,
        name: &str,
        magnitude: Magnitude,
    ) -> Result<(&BodyRecord, f64), ParseError> {
        let record = self.require(name)?;
        match record.positive_magnitude(magnitude) {
            Some(value) => Ok((record, value)),
            None => Err(Diagnostic::error(format!(
                "`{name}` has no usable {}",
                magnitude.label()
            ))
            .with_code(ErrorCode::E301)
            .with_label(
                record.magnitude_span(magnitude),
                ErrorCode::E301.description(),
            )
            .with_help(format!(
                "`{}` must be a finite number greater than zero",
                magnitude.column()
            ))
            .into()),
        }
    }
}
