mod interpolation;

pub use interpolation::resample_to_grid;
