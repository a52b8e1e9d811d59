//! Coordinates of the field-aligned simulation grid.

use crate::{
    error::{Result, Sami2Error},
    field::fdt,
};
use ndarray::prelude::*;

/// Labels of the two grid dimensions: position along a flux tube, and flux tube.
pub const GRID_DIMS: [&str; 2] = ["z", "f"];

/// Geographic coordinates of every grid point, indexed by
/// (position along flux tube, flux tube).
#[derive(Clone, Debug, PartialEq)]
pub struct GridCoordinates {
    glat: Array2<fdt>,
    glon: Array2<fdt>,
    zalt: Array2<fdt>,
}

impl GridCoordinates {
    /// Creates a new set of grid coordinates from latitudes [deg],
    /// longitudes [deg] and altitudes [km].
    pub fn new(glat: Array2<fdt>, glon: Array2<fdt>, zalt: Array2<fdt>) -> Result<Self> {
        for (name, values) in [("glon", &glon), ("zalt", &zalt)] {
            if values.dim() != glat.dim() {
                return Err(Sami2Error::shape(
                    name,
                    format!(
                        "Shape {:?} differs from latitude shape {:?}",
                        values.shape(),
                        glat.shape()
                    ),
                ));
            }
        }
        Ok(Self { glat, glon, zalt })
    }

    /// Returns the (z, f) shape of the grid.
    pub fn shape(&self) -> (usize, usize) {
        self.glat.dim()
    }

    /// Returns the geographic latitudes [deg].
    pub fn glat(&self) -> ArrayView2<fdt> {
        self.glat.view()
    }

    /// Returns the geographic longitudes [deg].
    pub fn glon(&self) -> ArrayView2<fdt> {
        self.glon.view()
    }

    /// Returns the altitudes [km].
    pub fn zalt(&self) -> ArrayView2<fdt> {
        self.zalt.view()
    }

    /// Returns the index of the grid dimension with the given label.
    pub fn axis_of(dim: &str) -> Option<Axis> {
        GRID_DIMS.iter().position(|&d| d == dim).map(Axis)
    }

    /// Returns the number of grid points along the dimension with the
    /// given label.
    pub fn len_of(&self, dim: &str) -> Option<usize> {
        Self::axis_of(dim).map(|axis| self.glat.len_of(axis))
    }

    /// Returns the coordinate array with the given name, if it exists.
    pub fn get(&self, name: &str) -> Option<ArrayView2<fdt>> {
        match name {
            "glat" => Some(self.glat()),
            "glon" => Some(self.glon()),
            "zalt" => Some(self.zalt()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn mismatched_shapes_are_rejected() {
        let result = GridCoordinates::new(
            Array2::zeros((3, 2)),
            Array2::zeros((3, 2)),
            Array2::zeros((2, 3)),
        );
        assert!(matches!(result, Err(Sami2Error::Shape { .. })));
    }

    #[test]
    fn coordinates_are_accessible_by_name() {
        let grid = GridCoordinates::new(
            Array2::from_elem((3, 2), 1.0),
            Array2::from_elem((3, 2), 2.0),
            Array2::from_elem((3, 2), 3.0),
        )
        .unwrap();
        assert_eq!(grid.shape(), (3, 2));
        assert_eq!(grid.get("zalt").unwrap()[[2, 1]], 3.0);
        assert!(grid.get("deni").is_none());
    }

    #[test]
    fn grid_dimensions_are_labeled() {
        let grid = GridCoordinates::new(
            Array2::zeros((5, 4)),
            Array2::zeros((5, 4)),
            Array2::zeros((5, 4)),
        )
        .unwrap();
        assert_eq!(GridCoordinates::axis_of("f"), Some(Axis(1)));
        assert_eq!(grid.len_of("z"), Some(5));
        assert_eq!(grid.len_of("f"), Some(4));
        assert_eq!(grid.len_of("ut"), None);
    }
}
