use std::path::{Path, PathBuf};

use blurry_core::pipeline::{BatchConfig, BatchReport};
use console::Style;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    warn: Style,
    error: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            warn: Style::new().yellow(),
            error: Style::new().red(),
            path: Style::new().underlined(),
        }
    }
}

const BANNER: &str = r"______  _                            _
| ___ \| |                          | |
| |_/ /| | _   _  _ __  _ __  _   _ | |
| ___ \| || | | || '__|| '__|| | | || |
| |_/ /| || |_| || |   | |   | |_| ||_|
\____/ |_| \__,_||_|   |_|    \__, |(_)
                               __/ |
                              |___/";

pub fn print_banner() {
    let s = Styles::new();
    println!();
    for line in BANNER.lines() {
        println!("  {}", s.title.apply_to(line));
    }
    println!();
}

pub fn print_score_settings(config: &BatchConfig, inputs: &[PathBuf]) {
    let s = Styles::new();

    println!("  {}", s.header.apply_to("Settings"));
    for (i, input) in inputs.iter().enumerate() {
        let label = if i == 0 { "Input" } else { "" };
        println!(
            "    {:<12}{}",
            s.label.apply_to(label),
            s.path.apply_to(input.display())
        );
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Coverage"),
        s.value.apply_to(format!(
            "{} ({:.1}% of rows and columns)",
            config.sample_coverage,
            config.sample_coverage.value() * 100.0
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Threads"),
        s.value.apply_to(config.effective_threads())
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Recursive"),
        s.value.apply_to(if config.recursive { "yes" } else { "no" })
    );
    println!();
}

pub fn print_batch_report(report: &BatchReport) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("Results"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Renamed"),
        s.value.apply_to(report.scored())
    );
    let rows = [
        ("Name taken", report.collisions(), &s.warn),
        ("Not images", report.not_images(), &s.warn),
        ("Unsupported", report.unsupported(), &s.warn),
        ("Failed", report.failed(), &s.error),
    ];
    for (label, count, style) in rows {
        if count > 0 {
            println!(
                "    {:<14}{}",
                s.label.apply_to(label),
                style.apply_to(count)
            );
        }
    }
    println!();
}

pub fn print_failure(path: &Path, reason: &str) {
    let s = Styles::new();
    println!(
        "{} {}: {}",
        s.error.apply_to("Cannot restore"),
        s.path.apply_to(path.display()),
        reason
    );
}
