pub mod channel;
pub mod dsp;
pub mod error;
pub mod filters;
pub mod grid;
pub mod house;
pub mod io;
pub mod session;
pub mod target;

pub use channel::{crossover_mismatches, default_channels, ChannelConfig, CrossoverMismatch};
pub use error::AppError;
pub use filters::{FilterConfig, FilterFamily, PassDirection};
pub use grid::{Curve, GRID_LEN, THIRD_OCTAVE_HZ};
pub use house::{HouseCurveRegistry, SharedRegistry, HOUSE_CURVE, HOUSE_CURVE_NAME};
pub use target::generate_target_curve;

/// Install the fmt subscriber, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
