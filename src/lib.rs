#![allow(non_snake_case)]

//! Exploratory analysis and linear regression models for housing-price data.
//!
//! The crate is organised as a one-pass pipeline: a CSV file is loaded into a
//! [`datasets::DataFrame`], described by the [`analysis`] module, projected onto
//! a fixed feature subset and split by [`datasets::train_test_split`], fitted by
//! the [`estimators`] and finally scored by [`metrics`]. [`pipeline::run`] wires
//! the stages together.

use ndarray::ScalarOperand;

use num_traits::{AsPrimitive, FromPrimitive, NumAssignOps, NumCast, Signed};

use std::cmp::PartialOrd;
use std::fmt;
use std::iter::Sum;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

/// Float point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point
/// number and implement them for 32bit and 64bit float points.
/// Ref: https://github.com/rust-ml/linfa/blob/master/src/dataset/mod.rs#L36
pub trait Float:
    'static
    + FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Signed
    + Sum
    + NumAssignOps
    + AsPrimitive<usize>
    + for<'a> AddAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> DivAssign<&'a Self>
    + num_traits::MulAdd<Output = Self>
    + ScalarOperand
    + approx::AbsDiffEq
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

pub mod analysis;
pub mod cd;
pub mod datafits;
pub mod datasets;
pub mod error;
pub mod estimators;
pub mod helpers;
pub mod metrics;
pub mod param_guard;
pub mod penalties;
pub mod pipeline;
pub mod plots;
pub mod traits;
