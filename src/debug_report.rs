use betscreen::{Analysis, Category};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const RED: &str = "\x1b[31m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(transcript: &str, analysis: &Analysis, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Screening: \"{}\"", preview(transcript)), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Categories ━━━", ansi::GRAY));
    for category in Category::ALL {
        let score = analysis.score.categories.get(&category).copied().unwrap_or(0);
        let painted = if score > 0 {
            palette.paint(format!("{score:>3}"), ansi::YELLOW)
        } else {
            palette.dim(format!("{score:>3}"))
        };
        println!("  {painted}  {}", palette.paint(category.as_str(), ansi::BLUE));
    }

    println!("\n{}", palette.paint("━━━ Flags ━━━", ansi::GRAY));
    if analysis.score.flags.is_empty() {
        println!("{}", palette.dim("  No rules fired"));
    } else {
        for (idx, flag) in analysis.score.flags.iter().enumerate() {
            println!(
                "  {} {} {} {}",
                palette.paint(format!("[{idx}]"), ansi::GRAY),
                palette.paint(flag.category.as_str(), ansi::BLUE),
                palette.dim("│"),
                palette.bold(palette.paint(flag.label, ansi::RED)),
            );
        }
    }

    println!("\n{}", palette.paint("━━━ Evidence ━━━", ansi::GRAY));
    if analysis.hits.is_empty() && analysis.features.operators.is_empty() {
        println!("{}", palette.dim("  No exact hits, no operators"));
    } else {
        for (label, spans) in &analysis.hits {
            let spans_fmt: Vec<String> = spans.iter().map(|s| format!("{}..{}", s.start, s.end)).collect();
            println!(
                "  {} {}",
                palette.paint(*label, ansi::CYAN),
                palette.paint(format!("span {}", spans_fmt.join(", ")), ansi::YELLOW)
            );
        }
        for operator in &analysis.features.operators {
            println!("  {} {}", palette.dim("operator:"), palette.paint(operator, ansi::CYAN));
        }
    }

    if !analysis.unavailable.is_empty() {
        println!(
            "\n{}",
            palette.paint(format!("Degraded: {} detector(s) unavailable", analysis.unavailable.join(", ")), ansi::YELLOW)
        );
    }

    println!(
        "\n  Overall: {}",
        palette.bold(palette.paint(
            analysis.score.overall.to_string(),
            if analysis.score.overall >= 50 { ansi::RED } else { ansi::GREEN }
        ))
    );
    println!();
}

fn preview(text: &str) -> String {
    let mut s: String = text.chars().take(80).collect();
    if text.chars().count() > 80 {
        s.push('…');
    }
    s
}
