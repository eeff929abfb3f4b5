// Tue Jan 13 2026 - Alex

use colored::Colorize;

const RULE_WIDTH: usize = 48;

/// Startup header: name and version, tagline, framed by rules.
pub struct Banner {
    name: &'static str,
    tagline: &'static str,
    version: &'static str,
}

impl Banner {
    pub fn render(&self, colored: bool) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let heading = format!("{:^RULE_WIDTH$}", format!("{} v{}", self.name, self.version));
        let tagline = format!("{:^RULE_WIDTH$}", self.tagline);

        if colored {
            format!("{}\n{}\n{}\n{}", rule.dimmed(), heading.cyan().bold(), tagline, rule.dimmed())
        } else {
            format!("{}\n{}\n{}\n{}", rule, heading, tagline, rule)
        }
    }

    pub fn print(&self) {
        println!("{}", self.render(true));
    }
}

impl Default for Banner {
    fn default() -> Self {
        Self {
            name: "camfeed",
            tagline: "RTSP stream viewer pool",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
