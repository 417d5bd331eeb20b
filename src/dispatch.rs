//! Hook pipeline: raw stdin bytes in, [`HookOutput`] out
//!
//! Every error is converted to a diagnostic with exit code 0 here. The only
//! non-zero exits come from deliberate warn/block decisions.

use std::future::Future;

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::audit::AuditLogger;
use crate::engine::ReadGuard;
use crate::error::GuardError;
use crate::input::HookInput;
use crate::output::HookOutput;

/// Read a stream to its end
pub async fn read_to_end<R>(reader: &mut R) -> Result<Vec<u8>, GuardError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await.map_err(GuardError::Stdin)?;
    Ok(buf)
}

/// Evaluate one hook payload, failing open on any error
pub async fn handle(guard: &ReadGuard, logger: &AuditLogger, raw: &[u8]) -> HookOutput {
    match try_handle(guard, logger, raw).await {
        Ok(output) => output,
        Err(e) => {
            tracing::debug!(error = %e, "failing open");
            HookOutput::diagnostic(e)
        }
    }
}

/// Read the whole payload from `reader`, then [`handle`] it
pub async fn handle_stream<R>(guard: &ReadGuard, logger: &AuditLogger, reader: &mut R) -> HookOutput
where
    R: AsyncRead + Unpin,
{
    match read_to_end(reader).await {
        Ok(raw) => handle(guard, logger, &raw).await,
        Err(e) => HookOutput::diagnostic(e),
    }
}

/// Run a pipeline future on its own task so a panic fails open
pub async fn run_isolated<F>(pipeline: F) -> HookOutput
where
    F: Future<Output = HookOutput> + Send + 'static,
{
    match tokio::spawn(pipeline).await {
        Ok(output) => output,
        Err(e) => HookOutput::diagnostic(GuardError::Aborted(e.to_string())),
    }
}

async fn try_handle(
    guard: &ReadGuard,
    logger: &AuditLogger,
    raw: &[u8],
) -> Result<HookOutput, GuardError> {
    let input = HookInput::from_slice(raw)?;

    // Other tools and whole-file reads pass straight through
    let Some(request) = input.read_request() else {
        return Ok(HookOutput::allow());
    };

    let decision = guard.check(&request);
    if decision.is_allow() {
        return Ok(HookOutput::allow());
    }

    let mut output = HookOutput::from_decision(&decision, &request, guard.config());

    if let Err(e) = logger.log_decision(&request, &decision).await {
        output.push_diagnostic(format_args!("Failed to log: {}", e));
    }

    Ok(output)
}
