//! Reading of the grid, time and field output files of a model run.

use super::{utils, Endianness, TIME_FILE_NAME};
use crate::{
    constants::{NF, NI, NZ},
    error::{Result, Sami2Error},
    field::{fdt, FieldData, NeutralFields},
    grid::GridCoordinates,
    time::{decimal_hours, ftm},
};
use log::debug;
use ndarray::{prelude::*, Dimension, IxDyn};
use std::path::{Path, PathBuf};

/// Output mode of the simulation, selected by the `fmtout` namelist flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Whitespace-delimited text tables (`<name>f.dat`).
    Formatted,
    /// Unformatted sequential Fortran records (`<name>u.dat`).
    Unformatted,
}

impl OutputFormat {
    pub fn from_fmtout(fmtout: bool) -> Self {
        if fmtout {
            Self::Formatted
        } else {
            Self::Unformatted
        }
    }

    /// Returns the name of the file holding the quantity with the given stem.
    pub fn file_name(&self, stem: &str) -> String {
        match self {
            Self::Formatted => format!("{}f.dat", stem),
            Self::Unformatted => format!("{}u.dat", stem),
        }
    }
}

/// Layout of a quantity in the output files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// File name stem of the quantity.
    pub stem: &'static str,
    /// Whether the quantity has an ion or neutral species dimension.
    pub has_species: bool,
    /// Whether the quantity has a time dimension.
    pub is_time_resolved: bool,
}

pub const GLAT: FieldDescriptor = FieldDescriptor::coordinate("glat");
pub const GLON: FieldDescriptor = FieldDescriptor::coordinate("glon");
pub const ZALT: FieldDescriptor = FieldDescriptor::coordinate("zalt");
pub const DENI: FieldDescriptor = FieldDescriptor::species("deni");
pub const VSI: FieldDescriptor = FieldDescriptor::species("vsi");
pub const TI: FieldDescriptor = FieldDescriptor::species("ti");
pub const TE: FieldDescriptor = FieldDescriptor::scalar("te");
pub const DENN: FieldDescriptor = FieldDescriptor::species("denn");
pub const U4: FieldDescriptor = FieldDescriptor::scalar("u4");

impl FieldDescriptor {
    const fn coordinate(stem: &'static str) -> Self {
        Self {
            stem,
            has_species: false,
            is_time_resolved: false,
        }
    }

    const fn species(stem: &'static str) -> Self {
        Self {
            stem,
            has_species: true,
            is_time_resolved: true,
        }
    }

    const fn scalar(stem: &'static str) -> Self {
        Self {
            stem,
            has_species: false,
            is_time_resolved: true,
        }
    }

    /// Returns the number of values stored for a single time step.
    pub fn payload_len(&self) -> usize {
        if self.has_species {
            NZ * NF * NI
        } else {
            NZ * NF
        }
    }

    /// Returns the number of time records stored for the given number of time steps.
    pub fn n_records(&self, n_time_steps: usize) -> usize {
        if self.is_time_resolved {
            n_time_steps
        } else {
            1
        }
    }

    /// Returns the shape of the quantity for the given number of time steps.
    pub fn shape(&self, n_time_steps: usize) -> Vec<usize> {
        let mut shape = vec![NZ, NF];
        if self.has_species {
            shape.push(NI);
        }
        if self.is_time_resolved {
            shape.push(n_time_steps);
        }
        shape
    }
}

/// Reader for the output files in a run directory.
#[derive(Clone, Debug)]
pub struct OutputReader {
    run_dir: PathBuf,
    format: OutputFormat,
    endianness: Endianness,
}

impl OutputReader {
    pub fn new<P: AsRef<Path>>(run_dir: P, format: OutputFormat, endianness: Endianness) -> Self {
        Self {
            run_dir: run_dir.as_ref().to_path_buf(),
            format,
            endianness,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Returns the path of the file holding the given quantity.
    pub fn field_path(&self, descriptor: &FieldDescriptor) -> PathBuf {
        self.run_dir.join(self.format.file_name(descriptor.stem))
    }

    /// Reads the universal times [hours] of the output time steps.
    ///
    /// Each row of the time file holds an index followed by the hour,
    /// minute and second of the time step.
    pub fn read_universal_times(&self) -> Result<Array1<ftm>> {
        let file_path = self.run_dir.join(TIME_FILE_NAME);
        let rows: Vec<Vec<ftm>> = utils::read_text_table_rows(&file_path)?;
        if rows.is_empty() {
            return Err(Sami2Error::table(&file_path, "No time steps found"));
        }
        let ut = rows
            .iter()
            .enumerate()
            .map(|(row, values)| match values.as_slice() {
                [_, hour, minute, second, ..] => Ok(decimal_hours(*hour, *minute, *second)),
                _ => Err(Sami2Error::table(
                    &file_path,
                    format!("Row {} has {} columns, expected at least 4", row, values.len()),
                )),
            })
            .collect::<Result<Vec<_>>>()?;
        debug!("Read {} time steps from {}", ut.len(), file_path.display());
        Ok(Array1::from_vec(ut))
    }

    /// Reads the given quantity and arranges it in its semantic shape,
    /// using column-major element order.
    pub fn read_field<D: Dimension>(
        &self,
        descriptor: &FieldDescriptor,
        n_time_steps: usize,
    ) -> Result<Array<fdt, D>> {
        let file_path = self.field_path(descriptor);
        let payload_len = descriptor.payload_len();
        let n_records = descriptor.n_records(n_time_steps);

        let values = match self.format {
            OutputFormat::Formatted => {
                let values: Vec<f64> = utils::read_text_values(&file_path)?;
                if values.len() != payload_len * n_records {
                    return Err(Sami2Error::table(
                        &file_path,
                        format!(
                            "Found {} values, expected {}",
                            values.len(),
                            payload_len * n_records
                        ),
                    ));
                }
                narrow_to_field_precision(values, &file_path)?
            }
            OutputFormat::Unformatted => utils::read_unformatted_records(
                &file_path,
                payload_len,
                n_records,
                self.endianness,
            )?,
        };
        debug!(
            "Read {} values of {} from {}",
            values.len(),
            descriptor.stem,
            file_path.display()
        );

        let shape = descriptor.shape(n_time_steps);
        Array::from_shape_vec(IxDyn(&shape).f(), values)
            .and_then(|values| values.into_dimensionality::<D>())
            .map_err(|err| Sami2Error::shape(descriptor.stem, err.to_string()))
    }

    /// Reads the geographic coordinates of the grid.
    pub fn read_grid(&self) -> Result<GridCoordinates> {
        GridCoordinates::new(
            self.read_field(&GLAT, 0)?,
            self.read_field(&GLON, 0)?,
            self.read_field(&ZALT, 0)?,
        )
    }

    /// Reads the plasma fields, and the neutral fields if requested.
    pub fn read_fields(&self, n_time_steps: usize, include_neutrals: bool) -> Result<FieldData> {
        let neutrals = if include_neutrals {
            Some(NeutralFields {
                denn: self.read_field(&DENN, n_time_steps)?,
                u4: self.read_field(&U4, n_time_steps)?,
            })
        } else {
            None
        };
        FieldData::new(
            self.read_field(&DENI, n_time_steps)?,
            self.read_field(&VSI, n_time_steps)?,
            self.read_field(&TI, n_time_steps)?,
            self.read_field(&TE, n_time_steps)?,
            neutrals,
        )
    }
}

/// Converts values parsed in double precision to field precision, failing
/// for finite values outside the representable range.
fn narrow_to_field_precision(values: Vec<f64>, file_path: &Path) -> Result<Vec<fdt>> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let narrowed = value as fdt;
            if value.is_finite() && !narrowed.is_finite() {
                Err(Sami2Error::table(
                    file_path,
                    format!(
                        "Value {} at position {} out of range for field precision",
                        value, index
                    ),
                ))
            } else {
                Ok(narrowed)
            }
        })
        .collect()
}
