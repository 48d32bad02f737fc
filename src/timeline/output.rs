use crate::cli::CommonArgs;
use crate::git::GitRepo;
use crate::model::{Bucket, ChartSeries, DateCommitRecord, TimelineOutput, SCHEMA_VERSION};
use anyhow::Result;
use chrono::Utc;
use console::style;

pub fn output_json(
    records: &[DateCommitRecord],
    repo: &GitRepo,
    common: &CommonArgs,
    bucket: Bucket,
    fill_gaps: bool,
) -> Result<()> {
    let output = TimelineOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: repo.path().to_string_lossy().to_string(),
        since: common.since.clone(),
        until: common.until.clone(),
        bucket,
        fill_gaps,
        records: records.to_vec(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_ndjson(records: &[DateCommitRecord]) -> Result<()> {
    for record in records {
        println!("{}", serde_json::to_string(record)?);
    }
    Ok(())
}

pub fn output_chart(records: &[DateCommitRecord]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&ChartSeries::from(records))?);
    Ok(())
}

fn commit_glyph(intensity: u32) -> &'static str {
    match intensity {
        0 => " ",
        1 => "▁",
        2 => "▃",
        3 => "▅",
        4 => "▇",
        _ => "█",
    }
}

fn lines_glyph(intensity: u32) -> &'static str {
    match intensity {
        0 => " ",
        1 => "░",
        2 => "▒",
        3 => "▓",
        _ => "█",
    }
}

pub fn output_sparkline(records: &[DateCommitRecord], common: &CommonArgs, bucket: Bucket) -> Result<()> {
    if let (Some(since), Some(until)) = (&common.since, &common.until) {
        println!("Filtering commits from {} to {}", since, until);
    } else if let Some(since) = &common.since {
        println!("Filtering commits since {}", since);
    } else if let Some(until) = &common.until {
        println!("Filtering commits until {}", until);
    }

    let max_commits = records.iter().map(|r| r.commit_count).max().unwrap_or(1).max(1);
    let max_lines = records
        .iter()
        .map(|r| r.additions + r.deletions)
        .max()
        .unwrap_or(1)
        .max(1);

    let title = match bucket {
        Bucket::Day => "Daily Commit Activity",
        Bucket::Week => "Weekly Commit Activity",
    };
    println!("{}", style(title).bold());
    println!("{}", "─".repeat(60));

    for record in records {
        let lines = record.additions + record.deletions;
        let commit_intensity = ((record.commit_count as f64 / max_commits as f64) * 5.0) as u32;
        let lines_intensity = ((lines as f64 / max_lines as f64) * 5.0) as u32;

        println!(
            "{} {} {} commits: {:>3}, +{:<6} -{:<6}",
            record.date.format("%Y-%m-%d"),
            style(commit_glyph(commit_intensity)).green(),
            style(lines_glyph(lines_intensity)).blue(),
            record.commit_count,
            record.additions,
            record.deletions
        );
    }

    println!("\n{}", style("Legend").bold());
    println!("  {} commits intensity", style("▁▃▅▇█").green());
    println!("  {} lines intensity", style("░▒▓█").blue());

    Ok(())
}
