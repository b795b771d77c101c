use super::request::{RunOutcome, RunRequest, ScriptTestOutcome, ScriptTestRequest, UploadedFile};
use crate::error::CollaboratorError;
use crate::workflow::JobDefinition;

/// Executes a job with the shaped argument map. Transport and sandboxing live
/// behind this seam.
pub trait RunJob {
    fn run(&self, request: &RunRequest) -> Result<RunOutcome, CollaboratorError>;
}

/// Executes a single script ad hoc, outside any saved job.
pub trait ScriptTest {
    fn test(&self, request: &ScriptTestRequest) -> Result<ScriptTestOutcome, CollaboratorError>;
}

/// Stores a raw file and returns its server-assigned path.
pub trait Upload {
    fn upload(&self, filename: &str, bytes: &[u8]) -> Result<UploadedFile, CollaboratorError>;
}

/// Persists and reloads job definitions. The editing codec
/// ([`crate::workflow::WorkflowEdit`]) must round-trip whatever this returns
/// without loss.
pub trait JobStore {
    fn save(&mut self, job: &JobDefinition) -> Result<(), CollaboratorError>;
    fn load(&self, job_id: i64) -> Result<JobDefinition, CollaboratorError>;
}
