//! Run-time assembly: argument collection, concurrent sub-form validation and
//! the seams to the external collaborators (run-job, script-test, upload,
//! persistence).

mod aggregate;
mod collaborators;
mod request;

pub use aggregate::{collect_args, validate_all};
pub use collaborators::{JobStore, RunJob, ScriptTest, Upload};
pub use request::{
    RunOutcome, RunRequest, RunResult, ScriptTestOutcome, ScriptTestRequest, UploadedFile,
};
