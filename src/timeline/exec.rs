use super::{output_chart, output_json, output_ndjson, output_sparkline};
use crate::analyze::RepositoryAnalyzer;
use crate::cli::{CommonArgs, TimelineArgs};
use crate::git::GitRepo;
use anyhow::Context;

pub fn exec(common: CommonArgs, args: TimelineArgs) -> anyhow::Result<()> {
    let repo = GitRepo::open(common.repo.as_ref()).context("Failed to open git repository")?;
    let range = repo
        .resolve_range(common.since.as_deref(), common.until.as_deref())
        .context("Failed to resolve date range")?;
    let repo = repo.with_range(range);

    let machine_readable = args.json || args.ndjson || args.chart;
    let mut analyzer = RepositoryAnalyzer::new(&repo)
        .jobs(common.jobs)
        .progress(common.show_progress(machine_readable));
    analyzer.analyze().context("Failed to analyze repository")?;

    let records = analyzer
        .time_series(args.fill_gaps, args.bucket)
        .context("Failed to build commit time series")?;

    if args.json {
        output_json(&records, &repo, &common, args.bucket, args.fill_gaps)?;
    } else if args.ndjson {
        output_ndjson(&records)?;
    } else if args.chart {
        output_chart(&records)?;
    } else {
        output_sparkline(&records, &common, args.bucket)?;
    }

    Ok(())
}
