fn main() -> anyhow::Result<()> {
    webchat_scraper::cli::run()
}
