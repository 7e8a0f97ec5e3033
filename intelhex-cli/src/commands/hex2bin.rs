use super::{open_input, open_output, write_report};
use anyhow::{Context, Result};
use intelhex_core::reconstructor::{hex_to_bin, ReconstructConfig, Reconstruction};
use tracing::info;

pub fn execute(
    input: Option<&str>,
    output: Option<&str>,
    report: Option<&str>,
) -> Result<Reconstruction> {
    info!("Converting {} to binary", input.unwrap_or("stdin"));

    let mut reader = open_input(input)?;
    let mut writer = open_output(output)?;

    let result = hex_to_bin(&mut reader, &mut writer, &ReconstructConfig::default())
        .with_context(|| format!("Failed to convert {}", input.unwrap_or("stdin")))?;

    match result.start_address {
        Some(start) => info!(
            "Wrote {} bytes starting at {:#06x}",
            result.data.len(),
            start
        ),
        None => info!("No data records found; output is empty"),
    }

    if result.stats.warnings > 0 {
        info!("{} malformed lines skipped", result.stats.warnings);
    }

    if let Some(report_path) = report {
        write_report(report_path, &result.stats)?;
        info!("Report written to: {}", report_path);
    }

    Ok(result)
}
