#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    match gradedesk::run().await {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("gradedesk fatal: {e:#}");
            std::process::exit(1);
        }
    }
}
