/*!
 * tempctl - Temp Tracker demo entry point
 *
 * Allocates tracked temp resources and removes them again:
 *   tempctl [file[=PREFIX] | dir[=PREFIX]]...
 *
 * With no arguments one file and one directory are allocated. The cleanup
 * report is printed to stdout as JSON; logs go to stderr. Cleanup runs even
 * when an allocation fails, and the allocation error is reported after it.
 */

use miette::{IntoDiagnostic, Result};
use tracing::{info, warn};

use temp_tracker::{
    init_tracing, AsyncTemp, CleanupReport, ResourceRequest, TempConfig, TempError, TempManager,
};

#[derive(Debug, PartialEq)]
enum Allocation {
    File(ResourceRequest),
    Dir(ResourceRequest),
}

fn parse_allocation(arg: &str) -> std::result::Result<Allocation, TempError> {
    let (kind, prefix) = match arg.split_once('=') {
        Some((kind, prefix)) => (kind, Some(prefix)),
        None => (arg, None),
    };
    let request = prefix.map(ResourceRequest::from).unwrap_or_default();

    match kind {
        "file" => Ok(Allocation::File(request)),
        "dir" => Ok(Allocation::Dir(request)),
        other => Err(TempError::InvalidRequest(format!(
            "unknown resource kind {:?}, expected file or dir",
            other
        ))),
    }
}

fn parse_args(args: &[String]) -> std::result::Result<Vec<Allocation>, TempError> {
    if args.is_empty() {
        return Ok(vec![
            Allocation::File(ResourceRequest::new()),
            Allocation::Dir(ResourceRequest::new()),
        ]);
    }
    args.iter().map(|arg| parse_allocation(arg)).collect()
}

async fn allocate(
    temp: &AsyncTemp,
    allocations: Vec<Allocation>,
) -> std::result::Result<(), TempError> {
    for allocation in allocations {
        match allocation {
            Allocation::File(request) => {
                let handle = temp.open(request).await?;
                info!(path = %handle.path.display(), "Allocated temp file");
            }
            Allocation::Dir(request) => {
                let path = temp.mkdir(request).await?;
                info!(path = %path.display(), "Allocated temp directory");
            }
        }
    }
    Ok(())
}

/// Allocate everything `args` asks for under tracking, then clean up
async fn run(
    args: &[String],
    temp: &AsyncTemp,
) -> std::result::Result<CleanupReport, TempError> {
    let allocations = parse_args(args)?;
    temp.track(true);

    let allocated = allocate(temp, allocations).await;
    let cleaned = temp.cleanup().await;

    match (allocated, cleaned) {
        (Ok(()), cleaned) => cleaned,
        (Err(e), Ok(report)) => {
            info!(
                removed = report.removed.len(),
                "Removed earlier allocations after failure"
            );
            Err(e)
        }
        (Err(e), Err(cleanup_err)) => {
            warn!(error = %cleanup_err, "Cleanup after failed allocation also failed");
            Err(e)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = TempConfig::from_env()?;
    let temp = AsyncTemp::new(TempManager::builder().with_config(config).build()?);

    let report = run(&args, &temp).await?;
    println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
    Ok(())
}
