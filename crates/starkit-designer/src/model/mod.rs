//! Shape model.

mod star;

pub use star::{
    StarParameters, StarSnapshot, INNER_RADIUS_MIN, ROUNDNESS_MAX, SPOKES_MAX, SPOKES_MIN,
};
