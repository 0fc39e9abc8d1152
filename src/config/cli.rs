use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "gig-applier")]
#[command(about = "Checks job boards and applies to the newest listings")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "platforms.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Fetch listings and report what would be applied to, without applying
    #[arg(long)]
    pub dry_run: bool,
}
