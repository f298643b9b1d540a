fn main() -> anyhow::Result<()> {
    voiceline::cli::run_cli()
}
