//! Full evaluation run: SSIM, PSNR and UIQM in one invocation.

use std::path::Path;

use anyhow::{Context, Result};
use uw_eval::{
    measure_no_reference, measure_paired, BatchConfig, EvalReport, MetricKind,
};

use super::measure::print_outcome;

#[allow(clippy::too_many_arguments)]
pub fn run(
    gtr_dir: &Path,
    gen_dir: &Path,
    ssim_suffix: &str,
    psnr_suffix: &str,
    uiqm_filter: Option<&str>,
    output: Option<&Path>,
    config: &BatchConfig,
    verbose: bool,
) -> Result<()> {
    let mut report = EvalReport::new("evaluation");

    let ssim = measure_paired(gtr_dir, gen_dir, ssim_suffix, MetricKind::Ssim, config)
        .context("SSIM batch failed")?;
    print_outcome(&ssim, verbose);
    report.push(ssim);

    let psnr = measure_paired(gtr_dir, gen_dir, psnr_suffix, MetricKind::Psnr, config)
        .context("PSNR batch failed")?;
    print_outcome(&psnr, verbose);
    report.push(psnr);

    let uiqm = measure_no_reference(gen_dir, uiqm_filter, MetricKind::Uiqm, config)
        .context("UIQM batch failed")?;
    print_outcome(&uiqm, verbose);
    report.push(uiqm);

    if let Some(dir) = output {
        let json_path = report.write_json(dir).context("failed to write JSON report")?;
        let csv_path = report.write_csv(dir).context("failed to write CSV report")?;
        println!("Wrote {}", json_path.display());
        println!("Wrote {}", csv_path.display());
    }

    Ok(())
}
