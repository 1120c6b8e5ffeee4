fn main() -> anyhow::Result<()> {
    fluxtimer_cli::run()
}
