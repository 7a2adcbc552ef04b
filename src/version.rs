// ABOUTME: Build information printed by `tmass version`

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commit and date are injected at build time through `TMASS_GIT_COMMIT`
/// and `TMASS_BUILD_DATE`; plain cargo builds report "unknown".
pub const GIT_COMMIT: Option<&str> = option_env!("TMASS_GIT_COMMIT");
pub const BUILD_DATE: Option<&str> = option_env!("TMASS_BUILD_DATE");

/// Version line printed by `tmass version`.
pub fn version_info() -> String {
    format!(
        "tmass {}\nGit commit: {}\nBuild date: {}\nOS/Arch: {}/{}",
        VERSION,
        GIT_COMMIT.unwrap_or("unknown"),
        BUILD_DATE.unwrap_or("unknown"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
