use crate::infra::{load_catalog, InMemoryFundRepository};
use clap::Args;
use gv_funds::config::AppConfig;
use gv_funds::error::AppError;
use gv_funds::funds::{
    BudgetTier, ComparisonTable, FundId, FundMatchService, IncomePreference, Nationality,
    QuizAnswers, QuizOutcome, Shortlist, Strategy, TaxAccountPreference, Timeline,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Fund catalog export (.json or .csv). Defaults to FUND_CATALOG_PATH, then the bundled sample.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct QuizArgs {
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
    /// Budget bracket: under250k, 250k-500k, or 500k+
    #[arg(long)]
    pub(crate) budget: Option<BudgetTier>,
    /// Strategy: safety, growth, or fast-exit
    #[arg(long)]
    pub(crate) strategy: Option<Strategy>,
    /// Whether ongoing income is wanted: yes or no
    #[arg(long)]
    pub(crate) income: Option<IncomePreference>,
    /// Whether a tax-account friendly (PFIC reporting) fund is wanted: yes or no
    #[arg(long)]
    pub(crate) tax_account: Option<TaxAccountPreference>,
    /// Timeline: 3-5-years, 5-8-years, or 8-plus-years
    #[arg(long)]
    pub(crate) timeline: Option<Timeline>,
    /// Nationality: us or non-us
    #[arg(long)]
    pub(crate) nationality: Option<Nationality>,
}

impl QuizArgs {
    pub(crate) fn answers(&self) -> QuizAnswers {
        QuizAnswers {
            budget: self.budget,
            strategy: self.strategy,
            income: self.income,
            tax_account: self.tax_account,
            timeline: self.timeline,
            nationality: self.nationality,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct RankArgs {
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
    /// Also list funds held back from the ranking and why
    #[arg(long)]
    pub(crate) show_excluded: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
    /// Fund ids to compare (two to four)
    #[arg(required = true, num_args = 1..)]
    pub(crate) fund_ids: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Budget bracket used for the demo quiz
    #[arg(long, default_value = "250k-500k")]
    pub(crate) budget: Option<BudgetTier>,
    /// Strategy used for the demo quiz
    #[arg(long, default_value = "safety")]
    pub(crate) strategy: Option<Strategy>,
}

fn service_for(
    args: &CatalogArgs,
) -> Result<FundMatchService<InMemoryFundRepository>, AppError> {
    let config = AppConfig::load()?;
    let funds = load_catalog(args.catalog.as_deref(), &config.catalog)?;
    Ok(FundMatchService::new(Arc::new(InMemoryFundRepository::new(
        funds,
    ))))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_quiz(args: QuizArgs) -> Result<(), AppError> {
    let service = service_for(&args.catalog)?;
    let outcome = service.quiz_matches(args.answers())?;

    if args.catalog.json {
        return print_json(&outcome);
    }
    print!("{}", render_quiz(&outcome));
    Ok(())
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let service = service_for(&args.catalog)?;
    let shortlist = service.ranking()?;

    if args.catalog.json {
        return print_json(&shortlist);
    }
    print!("{}", render_shortlist(&shortlist, args.show_excluded));
    Ok(())
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let service = service_for(&args.catalog)?;
    let ids: Vec<FundId> = args.fund_ids.into_iter().map(FundId).collect();
    let table = service.compare(&ids)?;

    if args.catalog.json {
        return print_json(&table);
    }
    print!("{}", render_comparison(&table));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = service_for(&CatalogArgs::default())?;
    let answers = QuizAnswers {
        budget: args.budget,
        strategy: args.strategy,
        ..QuizAnswers::default()
    };

    println!("Golden Visa fund matching demo");
    let outcome = service.quiz_matches(answers.clone())?;
    print!("{}", render_quiz(&outcome));

    let shortlist = service.shortlist_for(answers)?;
    println!();
    print!("{}", render_shortlist(&shortlist, true));

    let compared: Vec<FundId> = shortlist
        .ranked
        .iter()
        .take(gv_funds::funds::comparison::MAX_COMPARED_FUNDS)
        .map(|scored| scored.fund.id.clone())
        .collect();
    if compared.len() >= gv_funds::funds::comparison::MIN_COMPARED_FUNDS {
        let table = service.compare(&compared)?;
        println!();
        print!("{}", render_comparison(&table));
    }

    Ok(())
}

pub(crate) fn render_quiz(outcome: &QuizOutcome) -> String {
    let answered = outcome.answers.answered();
    let mut lines = vec![
        format!(
            "Quiz answers: {}",
            if answered.is_empty() {
                "none".to_string()
            } else {
                answered.join(", ")
            }
        ),
        format!(
            "{} of {} quiz-eligible funds match ({} in catalog)",
            outcome.matches.len(),
            outcome.eligible,
            outcome.considered
        ),
    ];

    if outcome.matches.is_empty() {
        lines.push("- No funds match these answers; try relaxing one of them.".to_string());
    }
    for matched in &outcome.matches {
        lines.push(format!("- {} ({})", matched.fund.name, matched.fund.id));
        lines.extend(matched.reasons.iter().map(|reason| format!("    * {reason}")));
        lines.extend(
            matched
                .advisories
                .iter()
                .map(|advisory| format!("    ! {advisory}")),
        );
    }
    into_report(lines)
}

pub(crate) fn render_shortlist(shortlist: &Shortlist, show_excluded: bool) -> String {
    let mut lines = vec![format!("Ranking ({} funds scored)", shortlist.ranked.len())];
    for (position, scored) in shortlist.ranked.iter().enumerate() {
        let verified = if scored.fund.is_verified {
            " [verified]"
        } else {
            ""
        };
        lines.push(format!(
            "{:>2}. {:<40} {:>6.2}{}",
            position + 1,
            scored.fund.name,
            scored.score,
            verified
        ));
        lines.push(format!("    {}", scored.justification));
    }

    if !shortlist.clusters.is_empty() {
        lines.push("Priority clusters:".to_string());
    }
    for cluster in &shortlist.clusters {
        let names: Vec<&str> = cluster
            .members
            .iter()
            .map(|scored| scored.fund.name.as_str())
            .collect();
        lines.push(format!("  - {}: {}", cluster.label, names.join(", ")));
    }

    if show_excluded && !shortlist.excluded.is_empty() {
        lines.push("Held back from ranking:".to_string());
        lines.extend(shortlist.excluded.iter().map(|excluded| {
            format!(
                "  - {} ({}): {}",
                excluded.name,
                excluded.id,
                excluded.reason.summary()
            )
        }));
    }
    into_report(lines)
}

pub(crate) fn render_comparison(table: &ComparisonTable) -> String {
    let mut header = format!("{:<22}", "Metric");
    for name in &table.fund_names {
        header.push_str(&format!(" | {:<24}", truncate(name, 24)));
    }

    let mut lines = vec![header];
    for row in &table.rows {
        let mut line = format!("{:<22}", row.metric);
        for cell in &row.cells {
            let marker = if cell.best { "*" } else { "" };
            line.push_str(&format!(" | {:<24}", format!("{}{}", cell.display, marker)));
        }
        lines.push(line);
    }
    lines.push("* best value in row".to_string());
    into_report(lines)
}

fn into_report(lines: Vec<String>) -> String {
    let mut report = lines.join("\n");
    report.push('\n');
    report
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let mut shortened: String = value.chars().take(width.saturating_sub(1)).collect();
        shortened.push('…');
        shortened
    }
}
