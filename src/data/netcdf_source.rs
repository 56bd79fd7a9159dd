//! NetCDF file source.

use super::source::check_slice;
use super::{ArraySource, Dimension, ElementType, Value, VariableInfo};
use crate::error::{NcTableError, Result};
use crate::table::RowIndex;
use netcdf::types::{FloatType, IntType, NcVariableType};
use netcdf::Extent;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

fn join_path(parent_path: &str, name: &str) -> String {
    if parent_path.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent_path, name)
    }
}

/// Array source reading from an open NetCDF file.
///
/// Variables in groups are named by their path from the root group without
/// a leading slash, e.g. `forecast/tas`.
pub struct NetcdfSource {
    path: PathBuf,
    file: RefCell<Option<netcdf::File>>,
}

impl std::fmt::Debug for NetcdfSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetcdfSource")
            .field("path", &self.path)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl NetcdfSource {
    /// Open a NetCDF file.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(NcTableError::file_open(
                path.to_path_buf(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            ));
        }
        tracing::info!("Opening netCDF file {}", path.display());
        let file = netcdf::open(path)
            .map_err(|e| NcTableError::NetCDF(format!("Failed to open file: {}", e)))?;
        Ok(Self {
            path: path.to_path_buf(),
            file: RefCell::new(Some(file)),
        })
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn with_file<T>(&self, f: impl FnOnce(&netcdf::File) -> Result<T>) -> Result<T> {
        let guard = self.file.borrow();
        let file = guard.as_ref().ok_or(NcTableError::Closed)?;
        f(file)
    }

    fn dimension_info(dim: &netcdf::Dimension<'_>) -> Dimension {
        Dimension {
            name: dim.name().to_string(),
            len: dim.len(),
            unlimited: dim.is_unlimited(),
        }
    }

    /// Variable metadata. `parent_path` is the slash-separated group path,
    /// empty for the root group.
    fn variable_info(var: &netcdf::Variable<'_>, parent_path: &str) -> Result<VariableInfo> {
        let name = join_path(parent_path, &var.name());
        let dtype = Self::element_type(&var.vartype()).ok_or_else(|| {
            NcTableError::UnsupportedType {
                name: name.clone(),
                vartype: format!("{:?}", var.vartype()),
            }
        })?;
        let attributes: HashMap<String, String> = var
            .attributes()
            .map(|attr| (attr.name().to_string(), Self::attr_value_to_string(&attr)))
            .collect();
        Ok(VariableInfo {
            name,
            dimensions: var.dimensions().iter().map(Self::dimension_info).collect(),
            dtype,
            attributes,
        })
    }

    fn push_variables<'f>(
        variables: impl Iterator<Item = netcdf::Variable<'f>>,
        parent_path: &str,
        out: &mut Vec<VariableInfo>,
    ) {
        for var in variables {
            match Self::variable_info(&var, parent_path) {
                Ok(info) => out.push(info),
                Err(e) => tracing::debug!("Skipping variable: {}", e),
            }
        }
    }

    fn read_group(group: &netcdf::Group<'_>, parent_path: &str, out: &mut Vec<VariableInfo>) {
        let group_path = join_path(parent_path, &group.name());
        Self::push_variables(group.variables(), &group_path, out);
        for child_group in group.groups() {
            Self::read_group(&child_group, &group_path, out);
        }
    }

    fn element_type(vartype: &NcVariableType) -> Option<ElementType> {
        let dtype = match vartype {
            NcVariableType::Int(IntType::I8) => ElementType::Byte,
            NcVariableType::Int(IntType::U8) => ElementType::UByte,
            NcVariableType::Int(IntType::I16) => ElementType::Short,
            NcVariableType::Int(IntType::U16) => ElementType::UShort,
            NcVariableType::Int(IntType::I32) => ElementType::Int,
            NcVariableType::Int(IntType::U32) => ElementType::UInt,
            NcVariableType::Int(IntType::I64) => ElementType::Int64,
            NcVariableType::Int(IntType::U64) => ElementType::UInt64,
            NcVariableType::Float(FloatType::F32) => ElementType::Float,
            NcVariableType::Float(FloatType::F64) => ElementType::Double,
            NcVariableType::Char => ElementType::Char,
            NcVariableType::String => ElementType::String,
            _ => return None,
        };
        Some(dtype)
    }

    /// Render an attribute value the way it is shown to users.
    pub(crate) fn attr_value_to_string(attr: &netcdf::Attribute<'_>) -> String {
        use netcdf::AttributeValue;

        match attr.value() {
            Ok(AttributeValue::Uchar(v)) => format!("{}", v),
            Ok(AttributeValue::Schar(v)) => format!("{}", v),
            Ok(AttributeValue::Ushort(v)) => format!("{}", v),
            Ok(AttributeValue::Short(v)) => format!("{}", v),
            Ok(AttributeValue::Uint(v)) => format!("{}", v),
            Ok(AttributeValue::Int(v)) => format!("{}", v),
            Ok(AttributeValue::Ulonglong(v)) => format!("{}", v),
            Ok(AttributeValue::Longlong(v)) => format!("{}", v),
            Ok(AttributeValue::Float(v)) => format!("{}", v),
            Ok(AttributeValue::Double(v)) => format!("{}", v),
            Ok(AttributeValue::Str(v)) => v,
            Ok(AttributeValue::Uchars(v)) => format!("{:?}", v),
            Ok(AttributeValue::Schars(v)) => format!("{:?}", v),
            Ok(AttributeValue::Ushorts(v)) => format!("{:?}", v),
            Ok(AttributeValue::Shorts(v)) => format!("{:?}", v),
            Ok(AttributeValue::Uints(v)) => format!("{:?}", v),
            Ok(AttributeValue::Ints(v)) => format!("{:?}", v),
            Ok(AttributeValue::Ulonglongs(v)) => format!("{:?}", v),
            Ok(AttributeValue::Longlongs(v)) => format!("{:?}", v),
            Ok(AttributeValue::Floats(v)) => format!("{:?}", v),
            Ok(AttributeValue::Doubles(v)) => format!("{:?}", v),
            Ok(AttributeValue::Strs(v)) => v.join(", "),
            Err(_) => format!("{:?}", attr),
        }
    }
}

fn read_error(name: &str, err: netcdf::Error) -> NcTableError {
    NcTableError::NetCDF(format!("Failed to read {}: {}", name, err))
}

/// Read a typed hyperslab and wrap each element.
macro_rules! read_as {
    ($var:expr, $extents:expr, $t:ty, $wrap:expr) => {{
        let values: Vec<$t> = $var
            .get_values::<$t, _>($extents)
            .map_err(|e| read_error(&$var.name(), e))?;
        values.into_iter().map($wrap).collect()
    }};
}

impl ArraySource for NetcdfSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn dimensions(&self) -> Result<Vec<Dimension>> {
        self.with_file(|file| Ok(file.dimensions().map(|d| Self::dimension_info(&d)).collect()))
    }

    fn variables(&self) -> Result<Vec<VariableInfo>> {
        self.with_file(|file| {
            let mut variables = Vec::new();
            Self::push_variables(file.variables(), "", &mut variables);
            if let Ok(groups) = file.groups() {
                for group in groups {
                    Self::read_group(&group, "", &mut variables);
                }
            }
            Ok(variables)
        })
    }

    fn variable(&self, name: &str) -> Result<Option<VariableInfo>> {
        let path = name.trim_start_matches('/');
        let parent_path = path.rsplit_once('/').map_or("", |(group, _)| group);
        self.with_file(|file| {
            file.variable(path)
                .map(|v| Self::variable_info(&v, parent_path))
                .transpose()
        })
    }

    fn read_slice(
        &self,
        variable: &VariableInfo,
        origin: &[usize],
        shape: &[usize],
    ) -> Result<Vec<Value>> {
        self.with_file(|file| {
            check_slice(variable, origin, shape)?;
            let path = variable.name.trim_start_matches('/');
            let var = file
                .variable(path)
                .ok_or_else(|| NcTableError::unknown_variable(&variable.name))?;
            let extents: Vec<Extent> = origin
                .iter()
                .zip(shape)
                .map(|(&o, &s)| Extent::from(o..o + s))
                .collect();

            let values: Vec<Value> = match variable.dtype {
                ElementType::Byte => read_as!(var, extents, i8, Value::Byte),
                ElementType::UByte => read_as!(var, extents, u8, Value::UByte),
                ElementType::Short => read_as!(var, extents, i16, Value::Short),
                ElementType::UShort => read_as!(var, extents, u16, Value::UShort),
                ElementType::Int => read_as!(var, extents, i32, Value::Int),
                ElementType::UInt => read_as!(var, extents, u32, Value::UInt),
                ElementType::Int64 => read_as!(var, extents, i64, Value::Int64),
                ElementType::UInt64 => read_as!(var, extents, u64, Value::UInt64),
                ElementType::Float => read_as!(var, extents, f32, Value::Float),
                ElementType::Double => read_as!(var, extents, f64, Value::Double),
                ElementType::Char => var
                    .get_raw_values(extents)
                    .map_err(|e| read_error(&variable.name, e))?
                    .into_iter()
                    .map(Value::Char)
                    .collect(),
                // Variable-length strings can only be fetched one element at a time.
                ElementType::String => RowIndex::new(shape.to_vec())
                    .iter()
                    .map(|offset| {
                        let element: Vec<Extent> = origin
                            .iter()
                            .zip(&offset)
                            .map(|(&o, &i)| Extent::from(o + i))
                            .collect();
                        var.get_string(element)
                            .map(Value::Str)
                            .map_err(|e| read_error(&variable.name, e))
                    })
                    .collect::<Result<Vec<_>>>()?,
            };
            Ok(values)
        })
    }

    fn close(&self) {
        if self.file.borrow_mut().take().is_some() {
            tracing::info!("Closed netCDF file {}", self.path.display());
        }
    }

    fn is_closed(&self) -> bool {
        self.file.borrow().is_none()
    }
}
