use manifest::ReportKind;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    org_manifest::execute(ReportKind::Issues).await
}
