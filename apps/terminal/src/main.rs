fn main() -> anyhow::Result<()> {
    lomo::run()
}
