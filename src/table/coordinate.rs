//! Dimension coordinates and dimension congruence.

use super::column::{decode_text, ColumnKind};
use super::time::Calendar;
use crate::data::{ArraySource, Dimension, Value, VariableInfo};
use crate::error::{NcTableError, Result};
use std::collections::HashSet;

/// Test if a variable has the same public dimensions as a table,
/// irrespective of order.
pub fn is_congruent(dimensions: &[Dimension], variable: &VariableInfo) -> bool {
    let key = |d: &Dimension| (d.name.clone(), d.len);
    let existing: HashSet<_> = dimensions.iter().map(key).collect();
    let candidate: HashSet<_> = variable.public_dimensions().iter().map(key).collect();
    existing == candidate
}

/// Produces the label values of a dimension.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateResolver {
    default_calendar: Calendar,
}

impl CoordinateResolver {
    /// Create a resolver. `default_calendar` decodes time coordinates that
    /// have no usable `calendar` attribute.
    pub fn new(default_calendar: Calendar) -> Self {
        Self { default_calendar }
    }

    /// Calendar used when a time variable does not name one.
    pub fn default_calendar(&self) -> Calendar {
        self.default_calendar
    }

    /// Find the coordinate variable of a dimension: the variable with the
    /// dimension's name, defined over that dimension alone.
    ///
    /// A namesake variable whose public rank is not 1 is an error. One whose
    /// element type cannot be shown leaves the dimension indexed by position.
    pub fn coordinate_variable(
        &self,
        source: &dyn ArraySource,
        dimension: &Dimension,
    ) -> Result<Option<VariableInfo>> {
        let variable = match source.variable(&dimension.name) {
            Ok(Some(variable)) => variable,
            Ok(None) => return Ok(None),
            Err(e @ NcTableError::UnsupportedType { .. }) => {
                tracing::debug!("Indexing dimension {} by position: {}", dimension.name, e);
                return Ok(None);
            },
            Err(e) => return Err(e),
        };
        let public = variable.public_dimensions();
        if public.len() != 1 {
            return Err(NcTableError::InvalidCoordinateVariable {
                name: variable.name.clone(),
                rank: public.len(),
            });
        }
        if !public[0].same_axis(dimension) {
            tracing::debug!(
                "{} is not a coordinate variable for dimension {}",
                variable.name,
                dimension.name
            );
            return Ok(None);
        }
        Ok(Some(variable))
    }

    /// Ordered label values of a dimension: its coordinate values, or the
    /// indexes `0..len` if it has no coordinate variable.
    pub fn resolve(&self, source: &dyn ArraySource, dimension: &Dimension) -> Result<Vec<Value>> {
        match self.coordinate_variable(source, dimension)? {
            Some(variable) => {
                let kind = ColumnKind::of(&variable, self.default_calendar);
                self.resolve_variable(source, &variable, &kind)
            },
            None => Ok((0..dimension.len).map(|i| Value::Int64(i as i64)).collect()),
        }
    }

    /// Read and decode every value of a coordinate variable.
    pub(crate) fn resolve_variable(
        &self,
        source: &dyn ArraySource,
        variable: &VariableInfo,
        kind: &ColumnKind,
    ) -> Result<Vec<Value>> {
        let len = variable.public_dimensions().first().map_or(0, |d| d.len);
        tracing::debug!("Resolving {} coordinate values from {}", len, variable.name);
        match kind {
            ColumnKind::FixedString { length } => (0..len)
                .map(|i| {
                    let chars = source.read_slice(variable, &[i, 0], &[1, *length])?;
                    Ok(Value::Str(decode_text(&chars)))
                })
                .collect(),
            ColumnKind::Time(units) => source
                .read_slice(variable, &[0], &[len])?
                .iter()
                .map(|raw| units.decode(raw).map(Value::Str))
                .collect(),
            ColumnKind::Data => source.read_slice(variable, &[0], &[len]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ElementType, MemorySource};

    fn source() -> Result<MemorySource> {
        MemorySource::new("coords")
            .with_dimension(Dimension::new("time", 2))
            .with_dimension(Dimension::new("lat", 3))
            .with_dimension(Dimension::new("lon", 2))
            .with_dimension(Dimension::new("station", 2))
            .with_dimension(Dimension::new("name_strlen", 5))
            .with_dimension(Dimension::new("level", 2))
            .with_variable(
                "time",
                ElementType::Double,
                &["time"],
                vec![Value::Double(0.0), Value::Double(1.5)],
            )?
            .with_attribute("time", "units", "days since 2000-01-01")
            .with_variable(
                "lat",
                ElementType::Float,
                &["lat"],
                vec![Value::Float(-45.0), Value::Float(0.0), Value::Float(45.0)],
            )?
            .with_text("station", &["station", "name_strlen"], &["alpha", "beta"])?
            .with_variable(
                "level",
                ElementType::Int,
                &["lat", "lon"],
                (0..6).map(Value::Int).collect(),
            )
    }

    #[test]
    fn test_congruence_ignores_order() -> Result<()> {
        let dims = vec![Dimension::new("lat", 3), Dimension::new("lon", 2)];
        let src = source()?;
        assert!(is_congruent(&dims, &src.variable("level")?.unwrap()));
        let reversed: Vec<_> = dims.iter().rev().cloned().collect();
        assert!(is_congruent(&reversed, &src.variable("level")?.unwrap()));
        assert!(!is_congruent(&dims, &src.variable("lat")?.unwrap()));
        Ok(())
    }

    #[test]
    fn test_congruence_uses_public_dimensions() -> Result<()> {
        let src = source()?;
        let station = src.variable("station")?.unwrap();
        assert!(is_congruent(&[Dimension::new("station", 2)], &station));
        Ok(())
    }

    #[test]
    fn test_resolve_index_values() -> Result<()> {
        let src = source()?;
        let resolver = CoordinateResolver::default();
        let values = resolver.resolve(&src, &Dimension::new("lon", 2))?;
        assert_eq!(values, vec![Value::Int64(0), Value::Int64(1)]);
        Ok(())
    }

    #[test]
    fn test_resolve_numeric_coordinates() -> Result<()> {
        let src = source()?;
        let values = CoordinateResolver::default().resolve(&src, &Dimension::new("lat", 3))?;
        assert_eq!(values[2], Value::Float(45.0));
        Ok(())
    }

    #[test]
    fn test_resolve_time_coordinates() -> Result<()> {
        let src = source()?;
        let values = CoordinateResolver::default().resolve(&src, &Dimension::new("time", 2))?;
        assert_eq!(
            values,
            vec![
                Value::Str("2000-01-01T00:00:00".into()),
                Value::Str("2000-01-02T12:00:00".into())
            ]
        );
        Ok(())
    }

    #[test]
    fn test_resolve_string_coordinates() -> Result<()> {
        let src = source()?;
        let values = CoordinateResolver::default().resolve(&src, &Dimension::new("station", 2))?;
        assert_eq!(values, vec![Value::Str("alpha".into()), Value::Str("beta".into())]);
        Ok(())
    }

    #[test]
    fn test_namesake_with_wrong_rank_is_fatal() -> Result<()> {
        let src = source()?;
        let err = CoordinateResolver::default()
            .resolve(&src, &Dimension::new("level", 2))
            .unwrap_err();
        assert!(matches!(err, NcTableError::InvalidCoordinateVariable { rank: 2, .. }));
        Ok(())
    }
}
