use custom_kw_messaging::Reporter;

use crate::config::ReportArgs;
use crate::error::ServerError;

pub async fn run(args: ReportArgs) -> Result<(), ServerError> {
    let mut reporter = Reporter::connect(args.name, &args.addr).await?;
    let reply = reporter.report(&args.description).await?;
    tracing::debug!(reporter = %reporter.name(), addr = %args.addr, "report acknowledged");
    println!("{reply}");
    Ok(())
}
