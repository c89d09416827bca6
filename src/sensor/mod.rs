//! Sensor feed core: validation, state, and connectivity status.

pub mod clock;
pub mod status;
pub mod store;
pub mod types;
pub mod validator;

pub use clock::{Clock, ManualClock, SystemClock};
pub use status::{CONNECTED_WINDOW, STALE_WINDOW};
pub use store::{Observation, ObservationSnapshot, ObservationStore};
pub use types::{ConnectivityStatus, Field, Reading};
pub use validator::{validate, HUMIDITY_RANGE, TEMPERATURE_RANGE};
