//! Physical output fields of a model run.

use crate::{
    constants::{ION_SPECIES, NEUTRAL_SPECIES},
    error::{Result, Sami2Error},
};
use ndarray::prelude::*;

/// Floating-point precision of the output fields.
#[allow(non_camel_case_types)]
pub type fdt = f32;

/// Labels of the dimensions of ion species-resolved fields.
pub const SPECIES_FIELD_DIMS: [&str; 4] = ["z", "f", "ion", "ut"];
/// Labels of the dimensions of neutral species-resolved fields.
pub const NEUTRAL_FIELD_DIMS: [&str; 4] = ["z", "f", "neutral", "ut"];
/// Labels of the dimensions of fields without a species dimension.
pub const SCALAR_FIELD_DIMS: [&str; 3] = ["z", "f", "ut"];

/// Output fields of a model run, each with time as the final dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldData {
    deni: Array4<fdt>,
    vsi: Array4<fdt>,
    ti: Array4<fdt>,
    te: Array3<fdt>,
    neutrals: Option<NeutralFields>,
}

/// Optional neutral atmosphere output.
#[derive(Clone, Debug, PartialEq)]
pub struct NeutralFields {
    pub denn: Array4<fdt>,
    pub u4: Array3<fdt>,
}

/// A named field with labeled dimensions.
#[derive(Clone, Debug)]
pub struct Variable<'a> {
    pub name: &'static str,
    pub dims: &'static [&'static str],
    pub values: ArrayViewD<'a, fdt>,
}

impl FieldData {
    /// Creates a new set of fields, verifying that they share the
    /// same (z, f) grid and number of time steps.
    pub fn new(
        deni: Array4<fdt>,
        vsi: Array4<fdt>,
        ti: Array4<fdt>,
        te: Array3<fdt>,
        neutrals: Option<NeutralFields>,
    ) -> Result<Self> {
        let fields = Self {
            deni,
            vsi,
            ti,
            te,
            neutrals,
        };
        let (nz, nf, _, nt) = fields.deni.dim();
        for variable in fields.variables() {
            let shape = variable.values.shape();
            let rank = shape.len();
            if shape[0] != nz || shape[1] != nf || shape[rank - 1] != nt {
                return Err(Sami2Error::shape(
                    variable.name,
                    format!(
                        "Shape {:?} inconsistent with grid ({}, {}) and {} time steps",
                        shape, nz, nf, nt
                    ),
                ));
            }
        }
        Ok(fields)
    }

    /// Returns the number of time steps.
    pub fn n_time_steps(&self) -> usize {
        self.te.dim().2
    }

    /// Returns the ion densities [cm^-3].
    pub fn deni(&self) -> ArrayView4<fdt> {
        self.deni.view()
    }

    /// Returns the ion velocities along the field [m/s].
    pub fn vsi(&self) -> ArrayView4<fdt> {
        self.vsi.view()
    }

    /// Returns the ion temperatures [K].
    pub fn ti(&self) -> ArrayView4<fdt> {
        self.ti.view()
    }

    /// Returns the electron temperatures [K].
    pub fn te(&self) -> ArrayView3<fdt> {
        self.te.view()
    }

    /// Returns the neutral densities [cm^-3], if they were loaded.
    pub fn denn(&self) -> Option<ArrayView4<fdt>> {
        self.neutrals.as_ref().map(|neutrals| neutrals.denn.view())
    }

    /// Returns the neutral wind [cm/s], if it was loaded.
    pub fn u4(&self) -> Option<ArrayView3<fdt>> {
        self.neutrals.as_ref().map(|neutrals| neutrals.u4.view())
    }

    pub fn has_neutrals(&self) -> bool {
        self.neutrals.is_some()
    }

    /// Returns all available fields with their dimension labels.
    pub fn variables(&self) -> Vec<Variable> {
        let mut variables = vec![
            Variable::species("deni", &self.deni),
            Variable::species("vsi", &self.vsi),
            Variable::species("ti", &self.ti),
            Variable::scalar("te", &self.te),
        ];
        if let Some(neutrals) = &self.neutrals {
            variables.push(Variable::neutral("denn", &neutrals.denn));
            variables.push(Variable::scalar("u4", &neutrals.u4));
        }
        variables
    }

    /// Returns the field with the given name, if it is available.
    pub fn get(&self, name: &str) -> Option<Variable> {
        self.variables()
            .into_iter()
            .find(|variable| variable.name == name)
    }
}

impl<'a> Variable<'a> {
    fn species(name: &'static str, values: &'a Array4<fdt>) -> Self {
        Self {
            name,
            dims: &SPECIES_FIELD_DIMS,
            values: values.view().into_dyn(),
        }
    }

    fn neutral(name: &'static str, values: &'a Array4<fdt>) -> Self {
        Self {
            name,
            dims: &NEUTRAL_FIELD_DIMS,
            values: values.view().into_dyn(),
        }
    }

    fn scalar(name: &'static str, values: &'a Array3<fdt>) -> Self {
        Self {
            name,
            dims: &SCALAR_FIELD_DIMS,
            values: values.view().into_dyn(),
        }
    }

    /// Returns the index of the dimension with the given label.
    pub fn axis_of(&self, dim: &str) -> Option<Axis> {
        self.dims.iter().position(|&d| d == dim).map(Axis)
    }

    /// Returns the names of the species along the species dimension,
    /// if the field has one.
    pub fn species_labels(&self) -> Option<&'static [&'static str]> {
        self.dims.iter().find_map(|&dim| match dim {
            "ion" => Some(&ION_SPECIES[..]),
            "neutral" => Some(&NEUTRAL_SPECIES[..]),
            _ => None,
        })
    }
}
