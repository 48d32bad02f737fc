use crate::analyze::RepositoryAnalyzer;
use crate::cli::CommonArgs;
use crate::git::GitRepo;
use crate::model::{AuthorRecord, AuthorsOutput, CommitRecord, SkippedCommit, SCHEMA_VERSION};
use anyhow::Context;
use chrono::Utc;
use console::style;
use std::collections::HashMap;

#[derive(Default)]
struct Tally {
    commits: u64,
    additions: u64,
    deletions: u64,
}

/// Groups commit records by author name.
pub fn reduce_authors<'a, I>(records: I) -> HashMap<String, AuthorRecord>
where
    I: IntoIterator<Item = &'a CommitRecord>,
{
    let mut tallies: HashMap<&'a str, Tally> = HashMap::new();
    for record in records {
        let tally = tallies.entry(record.author.as_str()).or_default();
        tally.commits += 1;
        tally.additions += record.additions;
        tally.deletions += record.deletions;
    }

    tallies
        .into_iter()
        .map(|(author, t)| {
            (
                author.to_string(),
                AuthorRecord {
                    author: author.to_string(),
                    commit_count: t.commits,
                    additions_sum: t.additions,
                    deletions_sum: t.deletions,
                },
            )
        })
        .collect()
}

/// Sum over all authors, labelled `TOTAL`.
pub fn total(authors: &HashMap<String, AuthorRecord>) -> AuthorRecord {
    authors.values().fold(
        AuthorRecord {
            author: "TOTAL".to_string(),
            commit_count: 0,
            additions_sum: 0,
            deletions_sum: 0,
        },
        |mut acc, a| {
            acc.commit_count += a.commit_count;
            acc.additions_sum += a.additions_sum;
            acc.deletions_sum += a.deletions_sum;
            acc
        },
    )
}

/// Most commits first; ties broken by name so the output is stable.
pub fn ranked(authors: &HashMap<String, AuthorRecord>) -> Vec<AuthorRecord> {
    let mut ranked: Vec<AuthorRecord> = authors.values().cloned().collect();
    ranked.sort_by(|a, b| {
        b.commit_count
            .cmp(&a.commit_count)
            .then_with(|| a.author.cmp(&b.author))
    });
    ranked
}

/// `value (pct)` with the share of `total` rounded to one decimal.
pub fn format_share(value: u64, total: u64) -> String {
    if total == 0 {
        return format!("{value} (0.0)");
    }
    let pct = (value as f64 * 1000.0 / total as f64).round() / 10.0;
    format!("{value} ({pct:.1})")
}

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let repo = GitRepo::open(common.repo.as_ref()).context("Failed to open git repository")?;
    let range = repo
        .resolve_range(common.since.as_deref(), common.until.as_deref())
        .context("Failed to resolve date range")?;
    let repo = repo.with_range(range);

    let mut analyzer = RepositoryAnalyzer::new(&repo)
        .jobs(common.jobs)
        .progress(common.show_progress(json || ndjson));
    let authors = analyzer.analyze().context("Failed to analyze repository")?;

    if json {
        output_json(&authors, analyzer.skipped(), &repo, &common)?;
    } else if ndjson {
        output_ndjson(&authors)?;
    } else {
        output_table(&authors, analyzer.skipped())?;
    }

    Ok(())
}

fn output_json(
    authors: &HashMap<String, AuthorRecord>,
    skipped: &[SkippedCommit],
    repo: &GitRepo,
    common: &CommonArgs,
) -> anyhow::Result<()> {
    let output = AuthorsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: repo.path().to_string_lossy().to_string(),
        since: common.since.clone(),
        until: common.until.clone(),
        total: total(authors),
        authors: ranked(authors),
        skipped: skipped.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(authors: &HashMap<String, AuthorRecord>) -> anyhow::Result<()> {
    for a in ranked(authors) {
        println!("{}", serde_json::to_string(&a)?);
    }
    Ok(())
}

fn output_table(authors: &HashMap<String, AuthorRecord>, skipped: &[SkippedCommit]) -> anyhow::Result<()> {
    if authors.is_empty() {
        println!("No commits to display");
        return Ok(());
    }

    let sum = total(authors);
    println!(
        "{:<30} {:>16} {:>18} {:>18}",
        style("Author").bold(),
        style("Commits").bold(),
        style("Additions").bold(),
        style("Deletions").bold()
    );
    println!("{}", "─".repeat(85));

    let row = |a: &AuthorRecord| {
        format!(
            "{:<30} {:>16} {:>18} {:>18}",
            a.author,
            format_share(a.commit_count, sum.commit_count),
            format_share(a.additions_sum, sum.additions_sum),
            format_share(a.deletions_sum, sum.deletions_sum)
        )
    };

    println!("{}", style(row(&sum)).bold());
    println!("{}", "─".repeat(85));
    for a in ranked(authors) {
        println!("{}", row(&a));
    }

    if !skipped.is_empty() {
        println!(
            "\n{} commits could not be diffed and were skipped",
            style(skipped.len()).yellow()
        );
    }
    Ok(())
}
