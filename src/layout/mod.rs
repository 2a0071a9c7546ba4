pub mod fit_box;

pub use fit_box::{FitBox, FitError};
