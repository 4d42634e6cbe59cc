use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use tracing::debug;

use titlegroup::{
    apply_overrides, init_tracing, ExclusionList, ExclusionSyntax, GroupingConfig,
    GroupingReport, OutputFormat, RuleOverride, TitleGrouper,
};

#[derive(Parser)]
#[command(name = "titlegroup")]
#[command(about = "Group near-duplicate product titles with configurable rules")]
struct Args {
    /// Titles file, one title per line (`-` or omitted reads stdin)
    #[arg(short, long)]
    input: Option<String>,

    /// Exclusion list file, one entry per line (added to any entries in the config)
    #[arg(short = 'x', long)]
    exclusions: Option<String>,

    /// Path to custom config file (YAML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Output format: text, json, or flat
    #[arg(short = 'f', long, default_value = "text")]
    output_format: OutputFormat,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<String>,

    /// Override one rule parameter, e.g. `distance.max_distance=10` (repeatable)
    #[arg(long = "set", value_name = "RULE.KEY=VALUE")]
    overrides: Vec<RuleOverride>,

    /// Switch a rule off: distance, start_words, last_words or exclusion (repeatable)
    #[arg(long = "disable", value_name = "RULE")]
    disabled: Vec<String>,

    /// Treat exclusion entries as plain text instead of patterns
    #[arg(long)]
    literal_exclusions: bool,

    /// Record why each adjacent pair was joined or split
    #[arg(long)]
    explain: bool,

    /// Show available config options and exit
    #[arg(long)]
    show_configs: bool,
}

fn main() {
    init_tracing();

    if let Err(e) = run(Args::parse()) {
        eprintln!("❌ Grouping failed: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    eprintln!("🦀 Titlegroup");

    if args.show_configs {
        show_help()?;
        return Ok(());
    }

    let config = build_config(&args)?;
    let text = read_titles(args.input.as_deref())?;

    let grouper = TitleGrouper::from_config(&config)?;
    let lines = titlegroup::split_titles(&text);
    debug!("Read {} non-blank titles", lines.len());
    let report = if args.explain {
        grouper.group_lines_with_trace(&lines)
    } else {
        GroupingReport {
            result: grouper.group_lines(&lines),
            decisions: Vec::new(),
        }
    };

    eprintln!("✅ Successfully grouped titles");
    eprintln!("📊 Grouping metrics:");
    eprintln!("   - Titles: {}", report.result.title_count());
    eprintln!("   - Clusters: {}", report.result.len());

    if args.explain {
        explain(&report);
    }

    let rendered = render(&report, args.output_format, args.explain)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered + "\n")
                .with_context(|| format!("failed to write output to {path}"))?;
            eprintln!("💾 Results saved to: {path}");
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

/// Config file first, then the exclusion file, then command line overrides
fn build_config(args: &Args) -> Result<GroupingConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let config = GroupingConfig::load_from_file(path)
                .with_context(|| format!("failed to load config from {path}"))?;
            eprintln!("📋 Loaded config from: {path}");
            config
        }
        None => {
            eprintln!("📋 Using default config");
            GroupingConfig::default()
        }
    };

    if let Some(path) = &args.exclusions {
        let extra = ExclusionList::load_from_file(path)
            .with_context(|| format!("failed to read exclusions from {path}"))?;
        eprintln!("🚫 Loaded {} exclusion entries from: {path}", extra.len());
        for entry in extra.entries() {
            config.exclusions.push(entry.as_str());
        }
    }

    if args.literal_exclusions {
        config.rules.exclusion.entry_syntax = ExclusionSyntax::Literal;
    }

    apply_overrides(&mut config.rules, &args.overrides, &args.disabled)
        .context("invalid rule override")?;

    debug!("Effective config:\n{}", config.to_yaml_string()?);
    Ok(config)
}

fn read_titles(input: Option<&str>) -> Result<String> {
    match input {
        Some(path) if path != "-" => {
            eprintln!("📄 Processing: {path}");
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read titles from {path}"))
        }
        _ => {
            eprintln!("📄 Processing: <stdin>");
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read titles from stdin")?;
            Ok(text)
        }
    }
}

/// JSON output carries a timestamp and counts around the core document
fn render(report: &GroupingReport, format: OutputFormat, explain: bool) -> Result<String> {
    let body = if explain {
        report.render(format)?
    } else {
        report.result.render(format)?
    };

    if format != OutputFormat::Json {
        return Ok(body);
    }

    let document: serde_json::Value = serde_json::from_str(&body)?;
    let envelope = serde_json::json!({
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "summary": {
            "titles": report.result.title_count(),
            "clusters": report.result.len(),
            "singletons": report.result.iter().filter(|c| c.len() == 1).count(),
        },
        "result": document,
    });
    Ok(serde_json::to_string_pretty(&envelope)?)
}

fn explain(report: &GroupingReport) {
    eprintln!("\n🔍 Pair decisions:");
    for decision in &report.decisions {
        let marker = if decision.same_cluster { "➕" } else { "🆕" };
        let failed = decision.verdict.failed_rules();
        if failed.is_empty() {
            eprintln!(
                "  {marker} '{}' after '{}' (distance {})",
                decision.current, decision.previous, decision.distance
            );
        } else {
            eprintln!(
                "  {marker} '{}' after '{}' (distance {}, failed: {})",
                decision.current,
                decision.previous,
                decision.distance,
                failed.join(", ")
            );
        }
    }
    eprintln!();
}

fn show_help() -> Result<()> {
    println!("\n📋 Available Configuration Options:");
    println!("  --config <path>           Load custom config file");
    println!("  --input <path>            Titles file, one per line (default: stdin)");
    println!("  --exclusions <path>       Exclusion list, one entry per line");
    println!("  --output <path>           Output file path (default: stdout)");
    println!("  --output-format <fmt>     Output format: text, json, or flat");
    println!("  --set <rule.key=value>    Override a rule parameter");
    println!("  --disable <rule>          Switch a rule off");
    println!("  --literal-exclusions      Match exclusion entries as plain text");
    println!("  --explain                 Show why each adjacent pair was joined or split");

    println!("\n📐 Rules:");
    println!("  distance     enabled, max_distance   Edit distance to the previous title");
    println!("  start_words  enabled, min_words      Shared leading words");
    println!("  last_words   enabled                 Titles must differ at the end");
    println!("  exclusion    enabled, entry_syntax   No digits or listed entries in the change");

    println!("\n📄 Output Formats:");
    println!("  text  - One title per line with +distance, blank line between clusters (default)");
    println!("  json  - Clusters with distances, counts and timestamp");
    println!("  flat  - Titles only, one array per cluster");

    println!("\n⚙️  Default config:");
    print!("{}", GroupingConfig::default().to_yaml_string()?);

    println!("\n📝 Usage Examples:");
    println!("  titlegroup -i titles.txt");
    println!("  titlegroup -i titles.txt -x exclusions.txt -f json -o groups.json");
    println!("  titlegroup -i titles.txt --set distance.max_distance=8 --disable last_words");
    println!("  cat titles.txt | titlegroup -c configs/default.yaml --explain");

    Ok(())
}
