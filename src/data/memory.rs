//! In-memory array source.
//!
//! Used by tests and by callers that already hold their arrays in memory.

use super::source::check_slice;
use super::{ArraySource, Dimension, ElementType, Value, VariableInfo};
use crate::error::{NcTableError, Result};
use ndarray::{ArrayD, IxDyn, Slice};
use std::cell::Cell;

/// Array source backed by `ndarray` arrays.
#[derive(Debug, Default)]
pub struct MemorySource {
    name: String,
    dimensions: Vec<Dimension>,
    variables: Vec<(VariableInfo, ArrayD<Value>)>,
    closed: Cell<bool>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Define a dimension.
    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimensions.retain(|d| d.name != dimension.name);
        self.dimensions.push(dimension);
        self
    }

    /// Define a variable over previously defined dimensions.
    ///
    /// `values` are in row-major order and must fill the variable's shape.
    pub fn with_variable(
        mut self,
        name: &str,
        dtype: ElementType,
        dim_names: &[&str],
        values: Vec<Value>,
    ) -> Result<Self> {
        let dimensions = dim_names
            .iter()
            .map(|n| {
                self.dimensions
                    .iter()
                    .find(|d| d.name == *n)
                    .cloned()
                    .ok_or_else(|| NcTableError::NetCDF(format!("Unknown dimension: {}", n)))
            })
            .collect::<Result<Vec<_>>>()?;
        let shape: Vec<usize> = dimensions.iter().map(|d| d.len).collect();
        let data = ArrayD::from_shape_vec(IxDyn(&shape), values)
            .map_err(|e| NcTableError::NetCDF(format!("Invalid shape/data size: {}", e)))?;
        self.variables.retain(|(v, _)| v.name != name);
        self.variables
            .push((VariableInfo::new(name, dimensions, dtype), data));
        Ok(self)
    }

    /// Define a classic string variable as a character array. Each string is
    /// padded with NUL bytes to the length of the last dimension.
    pub fn with_text(mut self, name: &str, dim_names: &[&str], strings: &[&str]) -> Result<Self> {
        let strlen = dim_names
            .last()
            .and_then(|n| self.dimensions.iter().find(|d| d.name == *n))
            .map(|d| d.len)
            .ok_or_else(|| {
                NcTableError::NetCDF(format!("No string length dimension for {}", name))
            })?;
        let mut chars = Vec::with_capacity(strings.len() * strlen);
        for s in strings {
            let mut bytes: Vec<u8> = s.bytes().take(strlen).collect();
            bytes.resize(strlen, 0);
            chars.extend(bytes.into_iter().map(Value::Char));
        }
        self = self.with_variable(name, ElementType::Char, dim_names, chars)?;
        Ok(self)
    }

    /// Set an attribute on a previously defined variable.
    pub fn with_attribute(mut self, variable: &str, key: &str, value: &str) -> Self {
        if let Some((info, _)) = self.variables.iter_mut().find(|(v, _)| v.name == variable) {
            info.attributes.insert(key.to_string(), value.to_string());
        }
        self
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.get() {
            Err(NcTableError::Closed)
        } else {
            Ok(())
        }
    }
}

impl ArraySource for MemorySource {
    fn location(&self) -> String {
        format!("memory:{}", self.name)
    }

    fn dimensions(&self) -> Result<Vec<Dimension>> {
        self.ensure_open()?;
        Ok(self.dimensions.clone())
    }

    fn variables(&self) -> Result<Vec<VariableInfo>> {
        self.ensure_open()?;
        Ok(self.variables.iter().map(|(v, _)| v.clone()).collect())
    }

    fn variable(&self, name: &str) -> Result<Option<VariableInfo>> {
        self.ensure_open()?;
        Ok(self
            .variables
            .iter()
            .find(|(v, _)| v.name == name)
            .map(|(v, _)| v.clone()))
    }

    fn read_slice(
        &self,
        variable: &VariableInfo,
        origin: &[usize],
        shape: &[usize],
    ) -> Result<Vec<Value>> {
        self.ensure_open()?;
        let (_, data) = self
            .variables
            .iter()
            .find(|(v, _)| v.name == variable.name)
            .ok_or_else(|| NcTableError::unknown_variable(&variable.name))?;
        check_slice(variable, origin, shape)?;
        let view = data.slice_each_axis(|ax| {
            let i = ax.axis.index();
            Slice::from(origin[i]..origin[i] + shape[i])
        });
        Ok(view.iter().cloned().collect())
    }

    fn close(&self) {
        tracing::debug!("Closing {}", self.location());
        self.closed.set(true);
    }

    fn is_closed(&self) -> bool {
        self.closed.get()
    }
}
