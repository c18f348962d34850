//! apdepack command-line binary

fn main() -> anyhow::Result<()> {
    apdepack::cli::run_cli()
}
