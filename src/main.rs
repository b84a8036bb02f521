fn main() -> Result<(), anyhow::Error> {
    algobench::run_cli()
}
