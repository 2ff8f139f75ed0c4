use anyhow::Result;

fn main() -> Result<()> {
    lastseen::cli::run()
}
