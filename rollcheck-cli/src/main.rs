fn main() -> anyhow::Result<()> {
    rollcheck_cli::run()
}
