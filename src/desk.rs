use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::config::{self, Constants};
use crate::error::{ConfigError, TransactionError};
use crate::ledger::PolicyLog;
use crate::policy::{PolicyApplication, PolicyRecord};
use crate::premium;

/// Issues policies one at a time against a constants file and a policy log.
///
/// Each [`issue`](PolicyDesk::issue) runs price, append, advance counter,
/// save constants, in that order, and stops at the first failure. The
/// counter on disk therefore only moves after its policy is in the log.
pub struct PolicyDesk {
    constants: Constants,
    constants_path: PathBuf,
    log: PolicyLog,
}

impl PolicyDesk {
    pub fn new(constants: Constants, constants_path: impl Into<PathBuf>, log: PolicyLog) -> Self {
        PolicyDesk { constants, constants_path: constants_path.into(), log }
    }

    /// Loads the constants file; the policy log is created on first append.
    pub fn open(
        constants_path: impl Into<PathBuf>,
        log_path: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let constants_path = constants_path.into();
        let constants = config::load(&constants_path)?;
        Ok(PolicyDesk::new(constants, constants_path, PolicyLog::new(log_path)))
    }

    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    pub fn constants_path(&self) -> &Path {
        &self.constants_path
    }

    pub fn log(&self) -> &PolicyLog {
        &self.log
    }

    #[instrument(skip_all, fields(cars = application.num_cars, method = %application.payment_method))]
    pub fn issue(
        &mut self,
        application: PolicyApplication,
    ) -> Result<PolicyRecord, TransactionError> {
        let number = self.constants.next_policy_number()?;
        let pricing = premium::price(
            &self.constants,
            application.num_cars,
            application.coverage,
            application.payment_method,
            application.down_payment,
        )?;
        let record = PolicyRecord::issue(number, application, &pricing);

        self.log.append(&record)?;

        let advanced = self.constants.after_issuing(number);
        config::save(&self.constants_path, &advanced)?;
        self.constants = advanced;

        info!(policy_number = %number, total_cost = record.total_cost, "policy issued");
        Ok(record)
    }
}
