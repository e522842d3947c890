use wtsrc::presentation::cli::CliApp;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let app = CliApp::new();
    let exit_code = app.run().await;
    std::process::exit(exit_code);
}
