pub mod scenario;
pub mod util;

pub use util::{artifacts_dir, capture_artifacts, run_stamp, split_csv};
