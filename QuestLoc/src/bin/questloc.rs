fn main() -> anyhow::Result<()> {
    questloc::cli::run_cli()
}
