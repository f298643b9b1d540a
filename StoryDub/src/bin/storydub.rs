fn main() -> anyhow::Result<()> {
    storydub::cli::run_cli()
}
