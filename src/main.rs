fn main() -> anyhow::Result<()> {
    prof_finder::cli::commands::run()
}
