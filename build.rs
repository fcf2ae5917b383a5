use shadow_rs::BuildPattern;
use shadow_rs::ShadowBuilder;

/// Embeds build metadata (version, git state) for `--version` and reports.
fn main() -> std::io::Result<()> {
    ShadowBuilder::builder()
        .build_pattern(BuildPattern::Lazy)
        .deny_const(Default::default())
        .build()
        .map_err(|e| std::io::Error::other(format!("Failed generating build metadata. {e}")))?;

    Ok(())
}
