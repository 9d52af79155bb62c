//! The aperture macro primitive type family.
//!
//! Each shape kind carries a fixed integer code (Comment `0`,
//! Circle `1`, Outline `4`, Polygon `5`, Moire `6`, Thermal `7`,
//! `VectorLine` `20`, `CenterLine` `21`, `LowerLeftLine` `22`). A statement
//! whose leading code is none of these round-trips untouched through
//! [`AmUnsupported`].
//!
//! Primitives carry no record of which unit system their fields are in.
//! [`AmPrimitive::to_inch`] and [`AmPrimitive::to_metric`] scale the
//! length-bearing fields unconditionally, so calling one of them twice
//! double-scales; tracking the current unit is the caller's job.

use serde::Serialize;

use crate::error::PrimitiveError;
use crate::units;

/// Exposure flag of a primitive: whether it adds or subtracts material
/// from the macro's composite shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Exposure {
    /// Adds material.
    On,
    /// Subtracts material.
    Off,
}

impl Exposure {
    /// Parses an exposure token. Accepts `on`/`off` in any case, plus the
    /// Gerber field forms `1`/`0`.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::InvalidValue`] for any other token.
    pub fn from_token(token: &str) -> Result<Self, PrimitiveError> {
        match token.to_ascii_lowercase().as_str() {
            "on" | "1" => Ok(Self::On),
            "off" | "0" => Ok(Self::Off),
            other => Err(PrimitiveError::InvalidValue(format!(
                "unknown exposure token `{other}`"
            ))),
        }
    }

    /// The Gerber field form, `1` for on and `0` for off.
    pub const fn to_gerber(self) -> &'static str {
        match self {
            Self::On => "1",
            Self::Off => "0",
        }
    }
}

/// Formats a dimensional, positional, or rotation field. Whole numbers
/// keep one decimal digit so the field always reads as a decimal.
fn decimal(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn decimal_pair(pair: (f64, f64)) -> String {
    format!("{},{}", decimal(pair.0), decimal(pair.1))
}

fn check_code(code: u32, required: u32) -> Result<(), PrimitiveError> {
    if code == required {
        Ok(())
    } else {
        Err(PrimitiveError::InvalidValue(format!(
            "primitive code {code} supplied where {required} was required"
        )))
    }
}

/// Positional cursor over the comma-separated fields of a statement body.
/// The `*` terminator is stripped up front; every field is trimmed so the
/// cosmetic line breaks in outline statements do not matter.
struct Fields<'a> {
    inner: std::str::Split<'a, char>,
    read: usize,
}

impl<'a> Fields<'a> {
    fn new(body: &'a str) -> Self {
        Self {
            inner: body.trim().trim_end_matches('*').split(','),
            read: 0,
        }
    }

    fn raw(&mut self) -> Result<&'a str, PrimitiveError> {
        self.read += 1;
        self.inner.next().map(str::trim).ok_or_else(|| {
            PrimitiveError::InvalidValue(format!(
                "statement ends after {} fields",
                self.read - 1
            ))
        })
    }

    fn decimal(&mut self) -> Result<f64, PrimitiveError> {
        let raw = self.raw()?;
        raw.parse::<f64>().map_err(|_| {
            PrimitiveError::InvalidType(format!("expected a decimal field, got `{raw}`"))
        })
    }

    fn integer(&mut self) -> Result<u32, PrimitiveError> {
        let raw = self.raw()?;
        raw.parse::<u32>().map_err(|_| {
            PrimitiveError::InvalidType(format!("expected an integer field, got `{raw}`"))
        })
    }

    fn pair(&mut self) -> Result<(f64, f64), PrimitiveError> {
        Ok((self.decimal()?, self.decimal()?))
    }

    fn exposure(&mut self) -> Result<Exposure, PrimitiveError> {
        Exposure::from_token(self.raw()?)
    }
}

/// Comment primitive, code `0`. Carries free text with no geometric effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmComment {
    /// Comment text, stripped of surrounding spaces and `*`.
    pub text: String,
}

impl AmComment {
    /// Builds a comment, checking the fixed code.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::InvalidValue`] when `code` is not `0`.
    pub fn new(code: u32, text: &str) -> Result<Self, PrimitiveError> {
        check_code(code, 0)?;
        Ok(Self {
            text: text.trim_matches(&[' ', '*'][..]).to_string(),
        })
    }

    /// Parses a comment statement body such as `0 Rounded rectangle. *`.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::InvalidValue`] when the body does not
    /// start with code `0`.
    pub fn from_gerber(body: &str) -> Result<Self, PrimitiveError> {
        let trimmed = body.trim();
        let rest = trimmed.strip_prefix('0').ok_or_else(|| {
            PrimitiveError::InvalidValue("comment statement must start with code 0".to_string())
        })?;
        Self::new(0, rest)
    }

    /// Serializes back to `0 <text> *`.
    pub fn to_gerber(&self) -> String {
        format!("0 {} *", self.text)
    }

    /// No length fields; identity.
    pub const fn to_inch(&mut self) {}

    /// No length fields; identity.
    pub const fn to_metric(&mut self) {}
}

/// Circle primitive, code `1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmCircle {
    /// Exposure flag.
    pub exposure: Exposure,
    /// Circle diameter.
    pub diameter: f64,
    /// Center position.
    pub position: (f64, f64),
}

impl AmCircle {
    /// Builds a circle, checking the fixed code.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::InvalidValue`] when `code` is not `1`.
    pub fn new(
        code: u32,
        exposure: Exposure,
        diameter: f64,
        position: (f64, f64),
    ) -> Result<Self, PrimitiveError> {
        check_code(code, 1)?;
        Ok(Self {
            exposure,
            diameter,
            position,
        })
    }

    /// Parses a statement body such as `1,0,5,0,0*`.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::InvalidType`] for non-numeric fields and
    /// [`PrimitiveError::InvalidValue`] for a wrong code, a bad exposure
    /// token, or missing fields.
    pub fn from_gerber(body: &str) -> Result<Self, PrimitiveError> {
        let mut fields = Fields::new(body);
        let code = fields.integer()?;
        let exposure = fields.exposure()?;
        let diameter = fields.decimal()?;
        let position = fields.pair()?;
        Self::new(code, exposure, diameter, position)
    }

    /// Serializes back to `1,<exposure>,<diameter>,<x>,<y>*`.
    pub fn to_gerber(&self) -> String {
        format!(
            "1,{},{},{}*",
            self.exposure.to_gerber(),
            decimal(self.diameter),
            decimal_pair(self.position)
        )
    }

    /// Scales diameter and position from millimeters to inches.
    pub fn to_inch(&mut self) {
        self.diameter = units::inch(self.diameter);
        self.position = units::inch_pair(self.position);
    }

    /// Scales diameter and position from inches to millimeters.
    pub fn to_metric(&mut self) {
        self.diameter = units::metric(self.diameter);
        self.position = units::metric_pair(self.position);
    }
}

/// Vector line primitive, code `20`: a stroked line between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmVectorLine {
    /// Exposure flag.
    pub exposure: Exposure,
    /// Line width.
    pub width: f64,
    /// Start point.
    pub start: (f64, f64),
    /// End point.
    pub end: (f64, f64),
    /// Rotation in degrees; unit-invariant.
    pub rotation: f64,
}

impl AmVectorLine {
    /// Builds a vector line, checking the fixed code.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::InvalidValue`] when `code` is not `20`.
    pub fn new(
        code: u32,
        exposure: Exposure,
        width: f64,
        start: (f64, f64),
        end: (f64, f64),
        rotation: f64,
    ) -> Result<Self, PrimitiveError> {
        check_code(code, 20)?;
        Ok(Self {
            exposure,
            width,
            start,
            end,
            rotation,
        })
    }

    /// Parses a statement body such as `20,1,0.9,0,0.45,12,0.45,0*`.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::InvalidType`] for non-numeric fields and
    /// [`PrimitiveError::InvalidValue`] for a wrong code, a bad exposure
    /// token, or missing fields.
    pub fn from_gerber(body: &str) -> Result<Self, PrimitiveError> {
        let mut fields = Fields::new(body);
        let code = fields.integer()?;
        let exposure = fields.exposure()?;
        let width = fields.decimal()?;
        let start = fields.pair()?;
        let end = fields.pair()?;
        let rotation = fields.decimal()?;
        Self::new(code, exposure, width, start, end, rotation)
    }

    /// Serializes back to `20,<exposure>,<width>,<start>,<end>,<rotation>*`.
    pub fn to_gerber(&self) -> String {
        format!(
            "20,{},{},{},{},{}*",
            self.exposure.to_gerber(),
            decimal(self.width),
            decimal_pair(self.start),
            decimal_pair(self.end),
            decimal(self.rotation)
        )
    }

    /// Scales width and endpoints from millimeters to inches.
    pub fn to_inch(&mut self) {
        self.width = units::inch(self.width);
        self.start = units::inch_pair(self.start);
        self.end = units::inch_pair(self.end);
    }

    /// Scales width and endpoints from inches to millimeters.
    pub fn to_metric(&mut self) {
        self.width = units::metric(self.width);
        self.start = units::metric_pair(self.start);
        self.end = units::metric_pair(self.end);
    }
}

/// Outline primitive, code `4`: a closed polygon traced from a start point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmOutline {
    /// Exposure flag.
    pub exposure: Exposure,
    /// First vertex of the outline.
    pub start_point: (f64, f64),
    /// Subsequent vertices; the last one must close back on `start_point`.
    pub points: Vec<(f64, f64)>,
    /// Rotation in degrees; unit-invariant.
    pub rotation: f64,
}

impl AmOutline {
    /// Builds an outline, checking the fixed code and closure.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::InvalidValue`] when `code` is not `4`,
    /// when fewer than two points follow the start point, or when the last
    /// point does not equal the start point.
    pub fn new(
        code: u32,
        exposure: Exposure,
        start_point: (f64, f64),
        points: Vec<(f64, f64)>,
        rotation: f64,
    ) -> Result<Self, PrimitiveError> {
        check_code(code, 4)?;
        if points.len() < 2 {
            return Err(PrimitiveError::InvalidValue(format!(
                "outline needs at least 2 points, got {}",
                points.len()
            )));
        }
        if points.last() != Some(&start_point) {
            return Err(PrimitiveError::InvalidValue(
                "outline start point and end point must be the same".to_string(),
            ));
        }
        Ok(Self {
            exposure,
            start_point,
            points,
            rotation,
        })
    }

    /// Parses a statement body such as `4,1,3,0,0,3,3,3,0,0,0,0*`. The
    /// third field counts the points that follow the start point.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::InvalidType`] for non-numeric fields and
    /// [`PrimitiveError::InvalidValue`] for a wrong code, a bad exposure
    /// token, missing fields, or an unclosed point list.
    pub fn from_gerber(body: &str) -> Result<Self, PrimitiveError> {
        let mut fields = Fields::new(body);
        let code = fields.integer()?;
        let exposure = fields.exposure()?;
        let n_points = fields.integer()?;
        let start_point = fields.pair()?;
        let mut points = Vec::new();
        for _ in 0..n_points {
            points.push(fields.pair()?);
        }
        let rotation = fields.decimal()?;
        Self::new(code, exposure, start_point, points, rotation)
    }

    /// Serializes back to the comma-joined form, with a line break after
    /// the start point and each point. The breaks are cosmetic; re-parsing
    /// yields the same value.
    pub fn to_gerber(&self) -> String {
        let mut out = format!(
            "4,{},{},{},\n",
            self.exposure.to_gerber(),
            self.points.len(),
            decimal_pair(self.start_point)
        );
        for point in &self.points {
            out.push_str(&decimal_pair(*point));
            out.push_str(",\n");
        }
        out.push_str(&decimal(self.rotation));
        out.push('*');
        out
    }

    /// Scales the start point and every point from millimeters to inches.
    pub fn to_inch(&mut self) {
        self.start_point = units::inch_pair(self.start_point);
        for point in &mut self.points {
            *point = units::inch_pair(*point);
        }
    }

    /// Scales the start point and every point from inches to millimeters.
    pub fn to_metric(&mut self) {
        self.start_point = units::metric_pair(self.start_point);
        for point in &mut self.points {
            *point = units::metric_pair(*point);
        }
    }
}

/// Regular polygon primitive, code `5`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmPolygon {
    /// Exposure flag.
    pub exposure: Exposure,
    /// Vertex count, between 3 and 12; unit-invariant.
    pub vertices: u32,
    /// Center position.
    pub position: (f64, f64),
    /// Circumscribed circle diameter.
    pub diameter: f64,
    /// Rotation in degrees; unit-invariant.
    pub rotation: f64,
}

impl AmPolygon {
    /// Builds a polygon, checking the fixed code and vertex range.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::InvalidValue`] when `code` is not `5` or
    /// `vertices` is outside `3..=12`.
    pub fn new(
        code: u32,
        exposure: Exposure,
        vertices: u32,
        position: (f64, f64),
        diameter: f64,
        rotation: f64,
    ) -> Result<Self, PrimitiveError> {
        check_code(code, 5)?;
        if !(3..=12).contains(&vertices) {
            return Err(PrimitiveError::InvalidValue(format!(
                "polygon vertex count {vertices} outside 3..=12"
            )));
        }
        Ok(Self {
            exposure,
            vertices,
            position,
            diameter,
            rotation,
        })
    }

    /// Parses a statement body such as `5,1,3,3.3,5.4,3,0*`.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::InvalidType`] for non-numeric fields and
    /// [`PrimitiveError::InvalidValue`] for a wrong code, a bad exposure
    /// token, missing fields, or a vertex count outside `3..=12`.
    pub fn from_gerber(body: &str) -> Result<Self, PrimitiveError> {
        let mut fields = Fields::new(body);
        let code = fields.integer()?;
        let exposure = fields.exposure()?;
        let vertices = fields.integer()?;
        let position = fields.pair()?;
        let diameter = fields.decimal()?;
        let rotation = fields.decimal()?;
        Self::new(code, exposure, vertices, position, diameter, rotation)
    }

    /// Serializes back with the vertex count as a bare integer.
    pub fn to_gerber(&self) -> String {
        format!(
            "5,{},{},{},{},{}*",
            self.exposure.to_gerber(),
            self.vertices,
            decimal_pair(self.position),
            decimal(self.diameter),
            decimal(self.rotation)
        )
    }

    /// Scales position and diameter from millimeters to inches.
    pub fn to_inch(&mut self) {
        self.position = units::inch_pair(self.position);
        self.diameter = units::inch(self.diameter);
    }

    /// Scales position and diameter from inches to millimeters.
    pub fn to_metric(&mut self) {
        self.position = units::metric_pair(self.position);
        self.diameter = units::metric(self.diameter);
    }
}

/// Moire primitive, code `6`: concentric rings with a crosshair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmMoire {
    /// Center position.
    pub position: (f64, f64),
    /// Outer ring diameter.
    pub diameter: f64,
    /// Thickness of each ring.
    pub ring_thickness: f64,
    /// Gap between rings.
    pub gap: f64,
    /// Maximum ring count; unit-invariant.
    pub max_rings: u32,
    /// Crosshair stroke thickness.
    pub crosshair_thickness: f64,
    /// Crosshair length.
    pub crosshair_length: f64,
    /// Rotation in degrees; unit-invariant.
    pub rotation: f64,
}

impl AmMoire {
    /// Builds a moire, checking the fixed code.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::InvalidValue`] when `code` is not `6`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        code: u32,
        position: (f64, f64),
        diameter: f64,
        ring_thickness: f64,
        gap: f64,
        max_rings: u32,
        crosshair_thickness: f64,
        crosshair_length: f64,
        rotation: f64,
    ) -> Result<Self, PrimitiveError> {
        check_code(code, 6)?;
        Ok(Self {
            position,
            diameter,
            ring_thickness,
            gap,
            max_rings,
            crosshair_thickness,
            crosshair_length,
            rotation,
        })
    }

    /// Parses a statement body such as `6,0,0,5,0.5,0.5,2,0.1,6,0*`.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::InvalidType`] for non-numeric fields and
    /// [`PrimitiveError::InvalidValue`] for a wrong code or missing fields.
    pub fn from_gerber(body: &str) -> Result<Self, PrimitiveError> {
        let mut fields = Fields::new(body);
        let code = fields.integer()?;
        let position = fields.pair()?;
        let diameter = fields.decimal()?;
        let ring_thickness = fields.decimal()?;
        let gap = fields.decimal()?;
        let max_rings = fields.integer()?;
        let crosshair_thickness = fields.decimal()?;
        let crosshair_length = fields.decimal()?;
        let rotation = fields.decimal()?;
        Self::new(
            code,
            position,
            diameter,
            ring_thickness,
            gap,
            max_rings,
            crosshair_thickness,
            crosshair_length,
            rotation,
        )
    }

    /// Serializes back with the ring count as a bare integer.
    pub fn to_gerber(&self) -> String {
        format!(
            "6,{},{},{},{},{},{},{},{}*",
            decimal_pair(self.position),
            decimal(self.diameter),
            decimal(self.ring_thickness),
            decimal(self.gap),
            self.max_rings,
            decimal(self.crosshair_thickness),
            decimal(self.crosshair_length),
            decimal(self.rotation)
        )
    }

    /// Scales every length field from millimeters to inches.
    pub fn to_inch(&mut self) {
        self.position = units::inch_pair(self.position);
        self.diameter = units::inch(self.diameter);
        self.ring_thickness = units::inch(self.ring_thickness);
        self.gap = units::inch(self.gap);
        self.crosshair_thickness = units::inch(self.crosshair_thickness);
        self.crosshair_length = units::inch(self.crosshair_length);
    }

    /// Scales every length field from inches to millimeters.
    pub fn to_metric(&mut self) {
        self.position = units::metric_pair(self.position);
        self.diameter = units::metric(self.diameter);
        self.ring_thickness = units::metric(self.ring_thickness);
        self.gap = units::metric(self.gap);
        self.crosshair_thickness = units::metric(self.crosshair_thickness);
        self.crosshair_length = units::metric(self.crosshair_length);
    }
}

/// Thermal relief primitive, code `7`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmThermal {
    /// Center position.
    pub position: (f64, f64),
    /// Outer ring diameter; must exceed `inner_diameter`.
    pub outer_diameter: f64,
    /// Inner ring diameter.
    pub inner_diameter: f64,
    /// Width of the spoke gap.
    pub gap: f64,
    /// Rotation in degrees; unit-invariant.
    pub rotation: f64,
}

impl AmThermal {
    /// Builds a thermal, checking the fixed code and diameter ordering.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::InvalidValue`] when `code` is not `7` or
    /// `outer_diameter` does not exceed `inner_diameter`.
    pub fn new(
        code: u32,
        position: (f64, f64),
        outer_diameter: f64,
        inner_diameter: f64,
        gap: f64,
        rotation: f64,
    ) -> Result<Self, PrimitiveError> {
        check_code(code, 7)?;
        if outer_diameter <= inner_diameter {
            return Err(PrimitiveError::InvalidValue(format!(
                "thermal outer diameter {outer_diameter} must exceed inner diameter {inner_diameter}"
            )));
        }
        Ok(Self {
            position,
            outer_diameter,
            inner_diameter,
            gap,
            rotation,
        })
    }

    /// Parses a statement body such as `7,0,0,7,6,0.2,45*`.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::InvalidType`] for non-numeric fields and
    /// [`PrimitiveError::InvalidValue`] for a wrong code, missing fields,
    /// or a non-increasing diameter pair.
    pub fn from_gerber(body: &str) -> Result<Self, PrimitiveError> {
        let mut fields = Fields::new(body);
        let code = fields.integer()?;
        let position = fields.pair()?;
        let outer_diameter = fields.decimal()?;
        let inner_diameter = fields.decimal()?;
        let gap = fields.decimal()?;
        let rotation = fields.decimal()?;
        Self::new(code, position, outer_diameter, inner_diameter, gap, rotation)
    }

    /// Serializes back to `7,<x>,<y>,<outer>,<inner>,<gap>,<rotation>*`.
    pub fn to_gerber(&self) -> String {
        format!(
            "7,{},{},{},{},{}*",
            decimal_pair(self.position),
            decimal(self.outer_diameter),
            decimal(self.inner_diameter),
            decimal(self.gap),
            decimal(self.rotation)
        )
    }

    /// Scales position, diameters, and gap from millimeters to inches.
    pub fn to_inch(&mut self) {
        self.position = units::inch_pair(self.position);
        self.outer_diameter = units::inch(self.outer_diameter);
        self.inner_diameter = units::inch(self.inner_diameter);
        self.gap = units::inch(self.gap);
    }

    /// Scales position, diameters, and gap from inches to millimeters.
    pub fn to_metric(&mut self) {
        self.position = units::metric_pair(self.position);
        self.outer_diameter = units::metric(self.outer_diameter);
        self.inner_diameter = units::metric(self.inner_diameter);
        self.gap = units::metric(self.gap);
    }
}

/// Center line primitive, code `21`: a rectangle placed by its center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmCenterLine {
    /// Exposure flag.
    pub exposure: Exposure,
    /// Rectangle width.
    pub width: f64,
    /// Rectangle height.
    pub height: f64,
    /// Center position.
    pub center: (f64, f64),
    /// Rotation in degrees; unit-invariant.
    pub rotation: f64,
}

impl AmCenterLine {
    /// Builds a center line, checking the fixed code.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::InvalidValue`] when `code` is not `21`.
    pub fn new(
        code: u32,
        exposure: Exposure,
        width: f64,
        height: f64,
        center: (f64, f64),
        rotation: f64,
    ) -> Result<Self, PrimitiveError> {
        check_code(code, 21)?;
        Ok(Self {
            exposure,
            width,
            height,
            center,
            rotation,
        })
    }

    /// Parses a statement body such as `21,1,6.8,1.2,3.4,0.6,0*`.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::InvalidType`] for non-numeric fields and
    /// [`PrimitiveError::InvalidValue`] for a wrong code, a bad exposure
    /// token, or missing fields.
    pub fn from_gerber(body: &str) -> Result<Self, PrimitiveError> {
        let mut fields = Fields::new(body);
        let code = fields.integer()?;
        let exposure = fields.exposure()?;
        let width = fields.decimal()?;
        let height = fields.decimal()?;
        let center = fields.pair()?;
        let rotation = fields.decimal()?;
        Self::new(code, exposure, width, height, center, rotation)
    }

    /// Serializes back to `21,<exposure>,<w>,<h>,<x>,<y>,<rotation>*`.
    pub fn to_gerber(&self) -> String {
        format!(
            "21,{},{},{},{},{}*",
            self.exposure.to_gerber(),
            decimal(self.width),
            decimal(self.height),
            decimal_pair(self.center),
            decimal(self.rotation)
        )
    }

    /// Scales width, height, and center from millimeters to inches.
    pub fn to_inch(&mut self) {
        self.width = units::inch(self.width);
        self.height = units::inch(self.height);
        self.center = units::inch_pair(self.center);
    }

    /// Scales width, height, and center from inches to millimeters.
    pub fn to_metric(&mut self) {
        self.width = units::metric(self.width);
        self.height = units::metric(self.height);
        self.center = units::metric_pair(self.center);
    }
}

/// Lower-left line primitive, code `22`: a rectangle placed by its
/// lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmLowerLeftLine {
    /// Exposure flag.
    pub exposure: Exposure,
    /// Rectangle width.
    pub width: f64,
    /// Rectangle height.
    pub height: f64,
    /// Lower-left corner position.
    pub lower_left: (f64, f64),
    /// Rotation in degrees; unit-invariant.
    pub rotation: f64,
}

impl AmLowerLeftLine {
    /// Builds a lower-left line, checking the fixed code.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::InvalidValue`] when `code` is not `22`.
    pub fn new(
        code: u32,
        exposure: Exposure,
        width: f64,
        height: f64,
        lower_left: (f64, f64),
        rotation: f64,
    ) -> Result<Self, PrimitiveError> {
        check_code(code, 22)?;
        Ok(Self {
            exposure,
            width,
            height,
            lower_left,
            rotation,
        })
    }

    /// Parses a statement body such as `22,1,6.8,1.2,3.4,0.6,0*`.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::InvalidType`] for non-numeric fields and
    /// [`PrimitiveError::InvalidValue`] for a wrong code, a bad exposure
    /// token, or missing fields.
    pub fn from_gerber(body: &str) -> Result<Self, PrimitiveError> {
        let mut fields = Fields::new(body);
        let code = fields.integer()?;
        let exposure = fields.exposure()?;
        let width = fields.decimal()?;
        let height = fields.decimal()?;
        let lower_left = fields.pair()?;
        let rotation = fields.decimal()?;
        Self::new(code, exposure, width, height, lower_left, rotation)
    }

    /// Serializes back to `22,<exposure>,<w>,<h>,<x>,<y>,<rotation>*`.
    pub fn to_gerber(&self) -> String {
        format!(
            "22,{},{},{},{},{}*",
            self.exposure.to_gerber(),
            decimal(self.width),
            decimal(self.height),
            decimal_pair(self.lower_left),
            decimal(self.rotation)
        )
    }

    /// Scales width, height, and corner from millimeters to inches.
    pub fn to_inch(&mut self) {
        self.width = units::inch(self.width);
        self.height = units::inch(self.height);
        self.lower_left = units::inch_pair(self.lower_left);
    }

    /// Scales width, height, and corner from inches to millimeters.
    pub fn to_metric(&mut self) {
        self.width = units::metric(self.width);
        self.height = units::metric(self.height);
        self.lower_left = units::metric_pair(self.lower_left);
    }
}

/// Catch-all for statements with an unrecognized leading code. Stores the
/// raw text verbatim so re-serialization is an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmUnsupported {
    /// The statement text exactly as given.
    pub text: String,
}

impl AmUnsupported {
    /// Wraps the raw statement text.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    /// Stores the statement text verbatim.
    pub fn from_gerber(body: &str) -> Self {
        Self::new(body)
    }

    /// Returns the stored text unchanged.
    pub fn to_gerber(&self) -> String {
        self.text.clone()
    }

    /// Unknown fields; identity.
    pub const fn to_inch(&mut self) {}

    /// Unknown fields; identity.
    pub const fn to_metric(&mut self) {}
}

/// One aperture macro primitive statement.
///
/// The set is closed over the shape codes in the Gerber format; every
/// operation matches exhaustively, so adding a future variant surfaces
/// every site that needs updating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AmPrimitive {
    /// Code `0`: free-text comment.
    Comment(AmComment),
    /// Code `1`: circle.
    Circle(AmCircle),
    /// Code `4`: closed outline polygon.
    Outline(AmOutline),
    /// Code `5`: regular polygon.
    Polygon(AmPolygon),
    /// Code `6`: moire target.
    Moire(AmMoire),
    /// Code `7`: thermal relief.
    Thermal(AmThermal),
    /// Code `20`: vector line.
    VectorLine(AmVectorLine),
    /// Code `21`: center-anchored rectangle.
    CenterLine(AmCenterLine),
    /// Code `22`: corner-anchored rectangle.
    LowerLeftLine(AmLowerLeftLine),
    /// Any statement whose leading code is not a known shape kind.
    Unsupported(AmUnsupported),
}

impl AmPrimitive {
    /// The fixed shape code, or `None` for [`Self::Unsupported`].
    pub const fn code(&self) -> Option<u32> {
        match self {
            Self::Comment(_) => Some(0),
            Self::Circle(_) => Some(1),
            Self::Outline(_) => Some(4),
            Self::Polygon(_) => Some(5),
            Self::Moire(_) => Some(6),
            Self::Thermal(_) => Some(7),
            Self::VectorLine(_) => Some(20),
            Self::CenterLine(_) => Some(21),
            Self::LowerLeftLine(_) => Some(22),
            Self::Unsupported(_) => None,
        }
    }

    /// Parses one statement body, routing on the leading code. A body
    /// whose leading field is not a known integer code becomes
    /// [`Self::Unsupported`] with the text stored verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::InvalidType`] when a known-code statement
    /// has a field that cannot be read as its required numeric type, and
    /// [`PrimitiveError::InvalidValue`] when a field is outside its
    /// allowed domain.
    pub fn from_gerber(body: &str) -> Result<Self, PrimitiveError> {
        let trimmed = body.trim();
        let code_token = trimmed
            .split(',')
            .next()
            .unwrap_or("")
            .split_whitespace()
            .next()
            .unwrap_or("");

        match code_token.parse::<u32>() {
            Ok(0) => AmComment::from_gerber(trimmed).map(Self::Comment),
            Ok(1) => AmCircle::from_gerber(trimmed).map(Self::Circle),
            Ok(4) => AmOutline::from_gerber(trimmed).map(Self::Outline),
            Ok(5) => AmPolygon::from_gerber(trimmed).map(Self::Polygon),
            Ok(6) => AmMoire::from_gerber(trimmed).map(Self::Moire),
            Ok(7) => AmThermal::from_gerber(trimmed).map(Self::Thermal),
            Ok(20) => AmVectorLine::from_gerber(trimmed).map(Self::VectorLine),
            Ok(21) => AmCenterLine::from_gerber(trimmed).map(Self::CenterLine),
            Ok(22) => AmLowerLeftLine::from_gerber(trimmed).map(Self::LowerLeftLine),
            Ok(_) | Err(_) => Ok(Self::Unsupported(AmUnsupported::from_gerber(body))),
        }
    }

    /// Serializes the primitive back to its statement text.
    pub fn to_gerber(&self) -> String {
        match self {
            Self::Comment(p) => p.to_gerber(),
            Self::Circle(p) => p.to_gerber(),
            Self::Outline(p) => p.to_gerber(),
            Self::Polygon(p) => p.to_gerber(),
            Self::Moire(p) => p.to_gerber(),
            Self::Thermal(p) => p.to_gerber(),
            Self::VectorLine(p) => p.to_gerber(),
            Self::CenterLine(p) => p.to_gerber(),
            Self::LowerLeftLine(p) => p.to_gerber(),
            Self::Unsupported(p) => p.to_gerber(),
        }
    }

    /// Scales every length-bearing field from millimeters to inches.
    /// Rotation, exposure, and count fields are untouched.
    pub fn to_inch(&mut self) {
        match self {
            Self::Comment(p) => p.to_inch(),
            Self::Circle(p) => p.to_inch(),
            Self::Outline(p) => p.to_inch(),
            Self::Polygon(p) => p.to_inch(),
            Self::Moire(p) => p.to_inch(),
            Self::Thermal(p) => p.to_inch(),
            Self::VectorLine(p) => p.to_inch(),
            Self::CenterLine(p) => p.to_inch(),
            Self::LowerLeftLine(p) => p.to_inch(),
            Self::Unsupported(p) => p.to_inch(),
        }
    }

    /// Scales every length-bearing field from inches to millimeters.
    /// Rotation, exposure, and count fields are untouched.
    pub fn to_metric(&mut self) {
        match self {
            Self::Comment(p) => p.to_metric(),
            Self::Circle(p) => p.to_metric(),
            Self::Outline(p) => p.to_metric(),
            Self::Polygon(p) => p.to_metric(),
            Self::Moire(p) => p.to_metric(),
            Self::Thermal(p) => p.to_metric(),
            Self::VectorLine(p) => p.to_metric(),
            Self::CenterLine(p) => p.to_metric(),
            Self::LowerLeftLine(p) => p.to_metric(),
            Self::Unsupported(p) => p.to_metric(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrimitiveError;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn exposure_tokens_normalize_case() {
        for token in ["on", "ON", "1"] {
            assert_eq!(Exposure::from_token(token).ok(), Some(Exposure::On));
        }
        for token in ["off", "OFF", "0"] {
            assert_eq!(Exposure::from_token(token).ok(), Some(Exposure::Off));
        }
    }

    #[test]
    fn exposure_rejects_unknown_token() {
        assert!(matches!(
            Exposure::from_token("exposed"),
            Err(PrimitiveError::InvalidValue(_))
        ));
    }

    #[test]
    fn decimal_keeps_whole_numbers_decimal() {
        assert_eq!(decimal(5.0), "5.0");
        assert_eq!(decimal(0.45), "0.45");
        assert_eq!(decimal(-3.0), "-3.0");
    }

    #[test]
    fn wrong_code_is_a_value_error() {
        assert!(matches!(
            AmCircle::new(2, Exposure::On, 0.0, (0.0, 0.0)),
            Err(PrimitiveError::InvalidValue(_))
        ));
        assert!(matches!(
            AmComment::new(1, "comment"),
            Err(PrimitiveError::InvalidValue(_))
        ));
        assert!(matches!(
            AmVectorLine::new(3, Exposure::On, 0.1, (0.0, 0.0), (3.3, 5.4), 0.0),
            Err(PrimitiveError::InvalidValue(_))
        ));
        assert!(matches!(
            AmCenterLine::new(22, Exposure::On, 0.2, 0.5, (0.0, 0.0), 0.0),
            Err(PrimitiveError::InvalidValue(_))
        ));
        assert!(matches!(
            AmLowerLeftLine::new(23, Exposure::On, 0.2, 0.5, (0.0, 0.0), 0.0),
            Err(PrimitiveError::InvalidValue(_))
        ));
    }

    #[test]
    fn non_numeric_field_is_a_type_error() {
        assert!(matches!(
            AmThermal::from_gerber("7,0,zero,7,6,0.2,45*"),
            Err(PrimitiveError::InvalidType(_))
        ));
        assert!(matches!(
            AmPolygon::from_gerber("5,1,3.5,3.3,5.4,3,0*"),
            Err(PrimitiveError::InvalidType(_))
        ));
    }

    #[test]
    fn comment_strips_padding_and_terminator() {
        let result = AmComment::new(0, " This is a comment *");
        assert!(result.is_ok());
        if let Ok(comment) = result {
            assert_eq!(comment.text, "This is a comment");
        }
    }

    #[test]
    fn comment_round_trip() {
        let result = AmComment::from_gerber("0 Rectangle with rounded corners. *");
        assert!(result.is_ok());
        if let Ok(comment) = result {
            assert_eq!(comment.text, "Rectangle with rounded corners.");
            assert_eq!(comment.to_gerber(), "0 Rectangle with rounded corners. *");
        }
    }

    #[test]
    fn circle_parse_and_dump() {
        let result = AmCircle::from_gerber("1,0,5,0,0*");
        assert!(result.is_ok());
        if let Ok(circle) = result {
            assert_eq!(circle.exposure, Exposure::Off);
            assert_close(circle.diameter, 5.0);
            assert_close(circle.position.0, 0.0);
            assert_eq!(circle.to_gerber(), "1,0,5.0,0.0,0.0*");
        }
    }

    #[test]
    fn circle_unit_conversion_both_ways() {
        let result = AmCircle::new(1, Exposure::Off, 25.4, (25.4, 0.0));
        assert!(result.is_ok());
        if let Ok(mut circle) = result {
            circle.to_inch();
            assert_close(circle.diameter, 1.0);
            assert_close(circle.position.0, 1.0);
            circle.to_metric();
            assert_close(circle.diameter, 25.4);
            assert_close(circle.position.0, 25.4);
        }
    }

    #[test]
    fn vector_line_parse_and_dump() {
        let result = AmVectorLine::from_gerber("20,1,0.9,0,0.45,12,0.45,0*");
        assert!(result.is_ok());
        if let Ok(line) = result {
            assert_eq!(line.exposure, Exposure::On);
            assert_close(line.width, 0.9);
            assert_close(line.start.1, 0.45);
            assert_close(line.end.0, 12.0);
            assert_eq!(line.to_gerber(), "20,1,0.9,0.0,0.45,12.0,0.45,0.0*");
        }
    }

    #[test]
    fn outline_requires_closure() {
        let open = AmOutline::new(
            4,
            Exposure::On,
            (0.0, 0.0),
            vec![(3.3, 5.4), (4.0, 5.4), (0.0, 1.0)],
            0.0,
        );
        assert!(matches!(open, Err(PrimitiveError::InvalidValue(_))));
    }

    #[test]
    fn outline_parse_dump_ignores_cosmetic_breaks() {
        let result = AmOutline::from_gerber("4,1,3,0,0,3,3,3,0,0,0,0*");
        assert!(result.is_ok());
        if let Ok(outline) = result {
            assert_eq!(outline.points, vec![(3.0, 3.0), (3.0, 0.0), (0.0, 0.0)]);
            let dumped = outline.to_gerber();
            assert_eq!(
                dumped.replace('\n', ""),
                "4,1,3,0.0,0.0,3.0,3.0,3.0,0.0,0.0,0.0,0.0*"
            );
            let reparsed = AmOutline::from_gerber(&dumped);
            assert_eq!(reparsed.ok().as_ref(), Some(&outline));
        }
    }

    #[test]
    fn outline_conversion_covers_every_point() {
        let result = AmOutline::new(
            4,
            Exposure::On,
            (0.0, 0.0),
            vec![(25.4, 25.4), (25.4, 0.0), (0.0, 0.0)],
            0.0,
        );
        assert!(result.is_ok());
        if let Ok(mut outline) = result {
            outline.to_inch();
            assert_eq!(outline.points, vec![(1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]);
        }
    }

    #[test]
    fn polygon_vertex_bounds() {
        assert!(AmPolygon::new(5, Exposure::On, 3, (3.3, 5.4), 3.0, 0.0).is_ok());
        assert!(AmPolygon::new(5, Exposure::On, 12, (3.3, 5.4), 3.0, 0.0).is_ok());
        assert!(matches!(
            AmPolygon::new(5, Exposure::On, 2, (3.3, 5.4), 3.0, 0.0),
            Err(PrimitiveError::InvalidValue(_))
        ));
        assert!(matches!(
            AmPolygon::new(5, Exposure::On, 13, (3.3, 5.4), 3.0, 0.0),
            Err(PrimitiveError::InvalidValue(_))
        ));
    }

    #[test]
    fn polygon_dump_keeps_vertex_count_bare() {
        let result = AmPolygon::from_gerber("5,1,3,3.3,5.4,3,0");
        assert!(result.is_ok());
        if let Ok(polygon) = result {
            assert_eq!(polygon.vertices, 3);
            assert_eq!(polygon.to_gerber(), "5,1,3,3.3,5.4,3.0,0.0*");
        }
    }

    #[test]
    fn moire_parse_and_dump() {
        let result = AmMoire::from_gerber("6,0,0,5,0.5,0.5,2,0.1,6,0*");
        assert!(result.is_ok());
        if let Ok(moire) = result {
            assert_eq!(moire.max_rings, 2);
            assert_close(moire.crosshair_length, 6.0);
            assert_eq!(moire.to_gerber(), "6,0.0,0.0,5.0,0.5,0.5,2,0.1,6.0,0.0*");
        }
    }

    #[test]
    fn moire_conversion_skips_ring_count() {
        let result = AmMoire::new(6, (25.4, 25.4), 25.4, 25.4, 25.4, 6, 25.4, 25.4, 0.0);
        assert!(result.is_ok());
        if let Ok(mut moire) = result {
            moire.to_inch();
            assert_close(moire.diameter, 1.0);
            assert_close(moire.gap, 1.0);
            assert_eq!(moire.max_rings, 6);
            assert_close(moire.rotation, 0.0);
        }
    }

    #[test]
    fn thermal_requires_outer_larger_than_inner() {
        assert!(matches!(
            AmThermal::new(7, (0.0, 0.0), 5.0, 7.0, 0.2, 0.0),
            Err(PrimitiveError::InvalidValue(_))
        ));
    }

    #[test]
    fn thermal_parse_and_dump() {
        let result = AmThermal::from_gerber("7,0,0,7,6,0.2,30*");
        assert!(result.is_ok());
        if let Ok(thermal) = result {
            assert_close(thermal.outer_diameter, 7.0);
            assert_close(thermal.rotation, 30.0);
            assert_eq!(thermal.to_gerber(), "7,0.0,0.0,7.0,6.0,0.2,30.0*");
        }
    }

    #[test]
    fn center_line_parse_dump_and_conversion() {
        let result = AmCenterLine::from_gerber("21,1,6.8,1.2,3.4,0.6,0*");
        assert!(result.is_ok());
        if let Ok(mut line) = result {
            assert_close(line.width, 6.8);
            assert_eq!(line.to_gerber(), "21,1,6.8,1.2,3.4,0.6,0.0*");
            line.to_metric();
            assert_close(line.width, 6.8 * 25.4);
            assert_close(line.center.0, 3.4 * 25.4);
        }
    }

    #[test]
    fn lower_left_line_parse_and_dump() {
        let result = AmLowerLeftLine::from_gerber("22,1,6.8,1.2,3.4,0.6,0*");
        assert!(result.is_ok());
        if let Ok(line) = result {
            assert_close(line.height, 1.2);
            assert_close(line.lower_left.1, 0.6);
            assert_eq!(line.to_gerber(), "22,1,6.8,1.2,3.4,0.6,0.0*");
        }
    }

    #[test]
    fn unsupported_is_an_identity() {
        let mut primitive = AmUnsupported::from_gerber("Test");
        primitive.to_inch();
        primitive.to_metric();
        assert_eq!(primitive.to_gerber(), "Test");
    }

    #[test]
    fn dispatch_routes_on_leading_code() {
        let circle = AmPrimitive::from_gerber("1,1,5,0,0*");
        assert!(matches!(circle, Ok(AmPrimitive::Circle(_))));
        let comment = AmPrimitive::from_gerber("0 Test Comment *");
        assert!(matches!(comment, Ok(AmPrimitive::Comment(_))));
        let unknown = AmPrimitive::from_gerber("8,1,2,3*");
        assert!(matches!(unknown, Ok(AmPrimitive::Unsupported(_))));
        let garbage = AmPrimitive::from_gerber("not a primitive");
        assert!(matches!(garbage, Ok(AmPrimitive::Unsupported(_))));
    }

    #[test]
    fn unit_round_trip_is_identity_within_tolerance() {
        let result = AmVectorLine::new(20, Exposure::On, 0.9, (0.1, 0.45), (12.0, 0.45), 15.0);
        assert!(result.is_ok());
        if let Ok(original) = result {
            let mut converted = original;
            converted.to_metric();
            converted.to_inch();
            assert_close(converted.width, original.width);
            assert_close(converted.start.0, original.start.0);
            assert_close(converted.end.1, original.end.1);
            assert_close(converted.rotation, original.rotation);
        }
    }
}
