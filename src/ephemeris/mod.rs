mod epoch;
mod record;
mod report;
mod resolver;
mod store;
mod window;

pub use epoch::{format_epoch, parse_epoch, EPOCH_FORMAT};
pub use record::{StateVector, VectorComponent};
pub use report::{range_report, UNDETERMINED};
pub use resolver::{nearest_to, Degradation, Resolved};
pub use store::{MemoryStore, StoreError, VectorStore};
pub use window::{slice_records, Adjustment, Window};
