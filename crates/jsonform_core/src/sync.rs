use serde_json::Value;

use crate::options::MergePolicy;
use crate::state::{FormData, FormState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The form state has no rendering surface yet; nothing was recorded.
    NotMounted,
    /// Data was not a record; every field went back to uninitialized.
    Cleared,
    Merged { keys: Vec<String> },
}

/// One-way push of external data into the form state. Every call counts as
/// a data change, so re-pushing an equal record still overwrites edits.
#[derive(Debug, Clone, Default)]
pub struct DataSynchronizer {
    policy: MergePolicy,
}

impl DataSynchronizer {
    pub fn new(policy: MergePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: MergePolicy) {
        self.policy = policy;
    }

    pub fn sync(&self, data: Option<&Value>, state: &mut FormState) -> SyncOutcome {
        if !state.is_mounted() {
            return SyncOutcome::NotMounted;
        }

        let outcome = match FormData::from_value(data) {
            FormData::Absent => {
                state.reset_fields();
                SyncOutcome::Cleared
            }
            FormData::Record(record) => {
                if self.policy == MergePolicy::OverwriteAll {
                    state.reset_fields();
                }
                SyncOutcome::Merged {
                    keys: state.set_fields_value(&record),
                }
            }
        };
        tracing::debug!(?outcome, policy = ?self.policy, "synchronized form data");
        outcome
    }
}
