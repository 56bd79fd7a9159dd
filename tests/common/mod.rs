//! Shared fixtures: small netCDF files written with the `netcdf` crate.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Write a small climate file:
///
/// - `time(time)` days since 2000-01-01, values 0 and 1.5
/// - `lat(lat)` -45, 0, 45
/// - `lon` without a coordinate variable
/// - `pr(time, lat, lon)` values 0..24
/// - `tas(time, lon, lat)` values 200..224
/// - `stations(lat)` for incongruent selections
pub fn climate_file(dir: &Path) -> Result<PathBuf, netcdf::Error> {
    let path = dir.join("climate.nc");
    let mut file = netcdf::create(&path)?;
    file.add_dimension("time", 2)?;
    file.add_dimension("lat", 3)?;
    file.add_dimension("lon", 4)?;

    let mut time = file.add_variable::<f64>("time", &["time"])?;
    time.put_attribute("units", "days since 2000-01-01")?;
    time.put_attribute("calendar", "standard")?;
    time.put_values(&[0.0, 1.5], ..)?;

    let mut lat = file.add_variable::<f32>("lat", &["lat"])?;
    lat.put_attribute("units", "degrees_north")?;
    lat.put_values(&[-45.0f32, 0.0, 45.0], ..)?;

    let mut pr = file.add_variable::<f32>("pr", &["time", "lat", "lon"])?;
    pr.put_attribute("long_name", "Precipitation")?;
    let values: Vec<f32> = (0..24).map(|i| i as f32).collect();
    pr.put_values(&values, ..)?;

    let mut tas = file.add_variable::<f32>("tas", &["time", "lon", "lat"])?;
    let values: Vec<f32> = (0..24).map(|i| 200.0 + i as f32).collect();
    tas.put_values(&values, ..)?;

    let mut stations = file.add_variable::<i32>("stations", &["lat"])?;
    stations.put_values(&[3, 1, 4], ..)?;

    Ok(path)
}

/// Temporary directory holding the climate file.
pub fn climate() -> Result<(TempDir, PathBuf), Box<dyn std::error::Error>> {
    fixture(climate_file)
}

/// Write a file with a root `tas(x)` of 1, 2 and a `forecast/tas(x)` of
/// 10, 20 inside the `forecast` group.
pub fn grouped_file(dir: &Path) -> Result<PathBuf, netcdf::Error> {
    let path = dir.join("grouped.nc");
    let mut file = netcdf::create(&path)?;
    file.add_dimension("x", 2)?;
    let mut tas = file.add_variable::<f32>("tas", &["x"])?;
    tas.put_values(&[1.0f32, 2.0], ..)?;

    let mut forecast = file.add_group("forecast")?;
    forecast.add_dimension("x", 2)?;
    let mut tas = forecast.add_variable::<f32>("tas", &["x"])?;
    tas.put_attribute("long_name", "Forecast temperature")?;
    tas.put_values(&[10.0f32, 20.0], ..)?;
    Ok(path)
}

/// Write a file of text variables:
///
/// - `station(station, name_strlen)` chars "oslo", "ab" NUL padded, "nice"
/// - `elevation(station)` shorts 94, 21, 10
/// - `label(station)` strings "first", "second", "third"
/// - `site(site)` strings "north", "south" as a coordinate variable
/// - `visits(site)` ints 5, 7
pub fn stations_file(dir: &Path) -> Result<PathBuf, netcdf::Error> {
    let path = dir.join("stations.nc");
    let mut file = netcdf::create(&path)?;
    file.add_dimension("station", 3)?;
    file.add_dimension("name_strlen", 4)?;
    file.add_dimension("site", 2)?;

    let mut station = file.add_variable_with_type(
        "station",
        &["station", "name_strlen"],
        &netcdf::types::NcVariableType::Char,
    )?;
    station.put_raw_values(b"osloab\0\0nice", ..)?;

    let mut elevation = file.add_variable::<i16>("elevation", &["station"])?;
    elevation.put_values(&[94i16, 21, 10], ..)?;

    let mut label = file.add_string_variable("label", &["station"])?;
    for (i, text) in ["first", "second", "third"].into_iter().enumerate() {
        label.put_string(text, i)?;
    }

    let mut site = file.add_string_variable("site", &["site"])?;
    site.put_string("north", 0)?;
    site.put_string("south", 1)?;

    let mut visits = file.add_variable::<i32>("visits", &["site"])?;
    visits.put_values(&[5, 7], ..)?;
    Ok(path)
}

/// Temporary directory holding one fixture file.
pub fn fixture(
    write: fn(&Path) -> Result<PathBuf, netcdf::Error>,
) -> Result<(TempDir, PathBuf), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = write(dir.path())?;
    Ok((dir, path))
}
