use super::{open_input, open_output, write_report};
use anyhow::{Context, Result};
use intelhex_core::converter::{bin_to_hex, ConvertConfig, ConvertStats};
use tracing::info;

pub fn execute(
    input: Option<&str>,
    output: Option<&str>,
    start_address: u16,
    bytes_per_record: usize,
    report: Option<&str>,
) -> Result<ConvertStats> {
    info!(
        "Converting {} to Intel HEX at {:#06x}",
        input.unwrap_or("stdin"),
        start_address
    );

    let config = ConvertConfig {
        start_address,
        bytes_per_record,
    };

    let mut reader = open_input(input)?;
    let mut writer = open_output(output)?;

    let stats = bin_to_hex(&mut reader, &mut writer, &config)
        .with_context(|| format!("Failed to convert {}", input.unwrap_or("stdin")))?;

    info!(
        "Wrote {} data records ({} bytes)",
        stats.data_records, stats.bytes_read
    );

    if let Some(report_path) = report {
        write_report(report_path, &stats)?;
        info!("Report written to: {}", report_path);
    }

    Ok(stats)
}
