use std::io::{BufRead, Write};

use tracing::{error, info};

use crate::desk::PolicyDesk;
use crate::error::SessionError;
use crate::interview::Interview;

/// Serves customers until the user declines another or input runs out.
///
/// A policy-log failure loses only that customer's policy; the session
/// carries on. Constants failures end the session. Returns the number of
/// policies issued.
pub fn run<R: BufRead, W: Write>(
    desk: &mut PolicyDesk,
    interview: &mut Interview<R, W>,
) -> Result<usize, SessionError> {
    let mut issued = 0;
    loop {
        let Some(application) = interview.collect_application()? else {
            info!("input closed mid-application; nothing saved");
            break;
        };

        match desk.issue(application) {
            Ok(record) => {
                interview.show_receipt(&record)?;
                issued += 1;
            }
            Err(e) if e.is_fatal_to_process() => {
                error!(error = %e, "transaction aborted; ending session");
                return Err(e.into());
            }
            Err(e) => {
                error!(error = %e, "transaction aborted");
                interview.say(&format!("Error saving policy data: {e}"))?;
            }
        }

        if !interview.another_customer()? {
            break;
        }
    }
    info!(issued, "session finished");
    Ok(issued)
}
